//! # Jobs Module
//!
//! Job posting CRUD: public listings with filters, authenticated writes with
//! created_by/updated_by audit stamps.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::Job;
pub use routes::jobs_routes;
