//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/v1/auth/register` - Create a new account
/// - `POST /api/v1/auth/login` - Password login, sets refresh cookie
/// - `GET /api/v1/auth/refresh` - Rotate the refresh token from the cookie
/// - `POST /api/v1/auth/logout` - Revoke the refresh token
/// - `GET /api/v1/auth/account` - Current principal
/// - `GET /api/v1/auth/google/callback` - OAuth completion + redirect
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/refresh", get(handlers::refresh))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/auth/account", get(handlers::get_account))
        .route("/api/v1/auth/google/callback", get(handlers::google_callback))
}
