//! # Users Module
//!
//! User account persistence (the credential store consumed by the session
//! manager) and the protected account-management endpoints.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

#[cfg(test)]
mod tests;

pub use models::UserAccount;
pub use routes::users_routes;
pub use store::UserStore;
