// src/jobs/handlers.rs
//! Job posting CRUD with pagination and filtering.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::models::{status_for, CreateJobRequest, Job, JobQueryParams, UpdateJobRequest};
use super::validators::JobValidator;
use crate::auth::extractors::AuthedUser;
use crate::common::{
    ApiError, AppState, PageParams, PaginatedResponse, PaginationMeta, Validator,
};

/// GET /api/v1/jobs - paginated list with name/location/active filters
pub async fn list_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<JobQueryParams>,
) -> Result<Json<PaginatedResponse<Job>>, ApiError> {
    let state = state_lock.read().await.clone();

    let (page, page_size, offset) = PageParams {
        page: params.page,
        page_size: params.page_size,
    }
    .resolve();

    let name_filter = like_pattern(params.name.as_deref());
    let location_filter = like_pattern(params.location.as_deref());

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM jobs
        WHERE name LIKE ?
          AND IFNULL(location, '') LIKE ?
          AND (? IS NULL OR active = ?)
        "#,
    )
    .bind(&name_filter)
    .bind(&location_filter)
    .bind(params.active)
    .bind(params.active)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let jobs = sqlx::query_as::<_, Job>(
        r#"
        SELECT * FROM jobs
        WHERE name LIKE ?
          AND IFNULL(location, '') LIKE ?
          AND (? IS NULL OR active = ?)
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&name_filter)
    .bind(&location_filter)
    .bind(params.active)
    .bind(params.active)
    .bind(page_size as i64)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    debug!(
        job_count = jobs.len(),
        total = total,
        page = page,
        page_size = page_size,
        "Loaded paginated jobs list"
    );

    Ok(Json(PaginatedResponse {
        meta: PaginationMeta::new(page, page_size, total),
        result: jobs,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn get_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, ApiError> {
    let state = state_lock.read().await.clone();

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    Ok(Json(job))
}

/// POST /api/v1/jobs - requires authentication; stamps created_by
pub async fn create_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = JobValidator.validate(&request);
    if !validation.is_valid {
        warn!(errors = ?validation.errors, "Job create failed validation");
        return Err(ApiError::from(validation));
    }

    let active = request.active.unwrap_or(true);

    let result = sqlx::query(
        r#"
        INSERT INTO jobs (
            name, location, salary, education_level, job_type, description,
            requirements, benefits, work_address, start_date, end_date,
            active, status, created_at, created_by
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, datetime('now'), ?)
        "#,
    )
    .bind(&request.name)
    .bind(&request.location)
    .bind(&request.salary)
    .bind(&request.education_level)
    .bind(&request.job_type)
    .bind(&request.description)
    .bind(&request.requirements)
    .bind(&request.benefits)
    .bind(&request.work_address)
    .bind(&request.start_date)
    .bind(&request.end_date)
    .bind(active)
    .bind(status_for(active))
    .bind(&authed.email)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let job_id = result.last_insert_rowid();

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(job_id = job_id, job_name = %job.name, created_by = %authed.email, "Job created");

    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id - full replacement; stamps updated_by
pub async fn update_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(job_id): Path<i64>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<Job>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = JobValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if exists == 0 {
        return Err(ApiError::NotFound(format!("Job not found: {}", job_id)));
    }

    let active = request.active.unwrap_or(true);

    sqlx::query(
        r#"
        UPDATE jobs
        SET name = ?, location = ?, salary = ?, education_level = ?,
            job_type = ?, description = ?, requirements = ?, benefits = ?,
            work_address = ?, start_date = ?, end_date = ?,
            active = ?, status = ?, updated_at = datetime('now'), updated_by = ?
        WHERE id = ?
        "#,
    )
    .bind(&request.name)
    .bind(&request.location)
    .bind(&request.salary)
    .bind(&request.education_level)
    .bind(&request.job_type)
    .bind(&request.description)
    .bind(&request.requirements)
    .bind(&request.benefits)
    .bind(&request.work_address)
    .bind(&request.start_date)
    .bind(&request.end_date)
    .bind(active)
    .bind(status_for(active))
    .bind(&authed.email)
    .bind(job_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
        .bind(job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(job_id = job_id, updated_by = %authed.email, "Job updated");

    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn delete_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(job_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(job_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Job not found: {}", job_id)));
    }

    info!(job_id = job_id, deleted_by = %authed.email, "Job deleted");

    Ok(Json(serde_json::json!({ "message": "Job deleted" })))
}

fn like_pattern(filter: Option<&str>) -> String {
    match filter {
        Some(value) if !value.trim().is_empty() => format!("%{}%", value.trim()),
        _ => "%".to_string(),
    }
}
