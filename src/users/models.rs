// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User account row. The password hash and stored refresh token never leave
/// the server in API responses.
#[derive(FromRow, Serialize, Debug, Clone)]
pub struct UserAccount {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub address: Option<String>,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Optional filters for the user listing endpoint, combined with pagination.
#[derive(Deserialize, Debug)]
pub struct UserQueryParams {
    pub page: Option<u32>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u32>,
    pub email: Option<String>,
    pub name: Option<String>,
}
