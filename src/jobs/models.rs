// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Job Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub education_level: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub work_address: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub active: bool,
    pub status: String,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateJobRequest {
    pub name: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub education_level: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub work_address: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

/// Update carries the full replacement, matching create.
pub type UpdateJobRequest = CreateJobRequest;

/// Listing filters combined with pagination.
#[derive(Deserialize, Debug)]
pub struct JobQueryParams {
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
}

/// `status` mirrors the `active` flag on every write.
pub fn status_for(active: bool) -> &'static str {
    if active {
        "ACTIVE"
    } else {
        "INACTIVE"
    }
}
