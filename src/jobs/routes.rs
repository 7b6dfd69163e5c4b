//! Job posting routes

use axum::{routing::get, Router};

use super::handlers;

/// Creates and returns the jobs router. Reads are public; writes pull the
/// authenticated user out of the bearer token.
pub fn jobs_routes() -> Router {
    Router::new()
        .route(
            "/api/v1/jobs",
            get(handlers::list_jobs).post(handlers::create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(handlers::get_job)
                .put(handlers::update_job)
                .delete(handlers::delete_job),
        )
}
