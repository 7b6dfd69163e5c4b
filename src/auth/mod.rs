//! # Auth Module
//!
//! Authentication and session lifecycle:
//! - credential login and registration
//! - JWT access/refresh token issuance with rotating refresh tokens
//! - Google OAuth account bridging
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sessions;
pub mod tokens;
pub mod validators;


pub use extractors::AuthedUser;
pub use routes::auth_routes;
