//! User management routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the users router (all routes require authentication)
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/v1/users", get(handlers::list_users))
        .route(
            "/api/v1/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/v1/users/change-password",
            post(handlers::change_password),
        )
}
