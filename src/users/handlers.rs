//! User management handlers (protected)

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{ChangePasswordRequest, UpdateUserRequest, UserAccount, UserQueryParams};
use crate::auth::extractors::AuthedUser;
use crate::common::{
    safe_email_log, ApiError, AppState, PageParams, PaginatedResponse, PaginationMeta,
};

/// GET /api/v1/users - paginated listing with optional email/name filters
pub async fn list_users(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Query(params): Query<UserQueryParams>,
) -> Result<Json<PaginatedResponse<UserAccount>>, ApiError> {
    let state = state_lock.read().await.clone();

    let (page, page_size, offset) = PageParams {
        page: params.page,
        page_size: params.page_size,
    }
    .resolve();

    let email_filter = like_pattern(params.email.as_deref());
    let name_filter = like_pattern(params.name.as_deref());

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE email LIKE ? AND IFNULL(name, '') LIKE ?",
    )
    .bind(&email_filter)
    .bind(&name_filter)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let users = sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT * FROM users
        WHERE email LIKE ? AND IFNULL(name, '') LIKE ?
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&email_filter)
    .bind(&name_filter)
    .bind(page_size as i64)
    .bind(offset)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(PaginatedResponse {
        meta: PaginationMeta::new(page, page_size, total),
        result: users,
    }))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserAccount>, ApiError> {
    let state = state_lock.read().await.clone();

    let account = state
        .store
        .find_by_id(user_id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", user_id)))?;

    Ok(Json(account))
}

/// PUT /api/v1/users/:id - profile fields only; email and password have their
/// own flows
pub async fn update_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    _authed: AuthedUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    let state = state_lock.read().await.clone();

    let updated = state
        .store
        .update_profile(
            user_id,
            request.name.as_deref(),
            request.age,
            request.gender.as_deref(),
            request.address.as_deref(),
        )
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound(format!("User not found: {}", user_id)))?;

    info!(user_id = user_id, "User profile updated");

    Ok(Json(updated))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let deleted = state
        .store
        .delete(user_id)
        .await
        .map_err(ApiError::DatabaseError)?;

    if !deleted {
        return Err(ApiError::NotFound(format!("User not found: {}", user_id)));
    }

    info!(user_id = user_id, deleted_by = %safe_email_log(&authed.email), "User deleted");

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

/// POST /api/v1/users/change-password
///
/// Verifies the old password for the current principal before storing the
/// new hash.
pub async fn change_password(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    if request.new_password.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "new_password: must not be blank".to_string(),
        ));
    }

    let account = state
        .store
        .find_by_id(authed.id)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let old_matches = bcrypt::verify(&request.old_password, &account.password_hash)
        .map_err(|_| ApiError::InternalServer("Password verification failed".to_string()))?;

    if !old_matches {
        warn!(
            user_id = authed.id,
            email = %safe_email_log(&authed.email),
            "Change password rejected: old password mismatch"
        );
        return Err(ApiError::BadRequest("Old password is incorrect".to_string()));
    }

    let new_hash = bcrypt::hash(&request.new_password, state.sessions.bcrypt_cost())
        .map_err(|_| ApiError::InternalServer("Password hashing failed".to_string()))?;

    state
        .store
        .update_password(authed.id, &new_hash)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(user_id = authed.id, "Password changed");

    Ok(Json(serde_json::json!({ "message": "Password changed" })))
}

fn like_pattern(filter: Option<&str>) -> String {
    match filter {
        Some(value) if !value.trim().is_empty() => format!("%{}%", value.trim()),
        _ => "%".to_string(),
    }
}
