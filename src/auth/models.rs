//! Authentication data models

use serde::{Deserialize, Serialize};

/// Minimal user projection embedded in token claims and session responses
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserLogin {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

/// JWT claims structure shared by access and refresh tokens
///
/// `sub` is the account email. `jti` is random per token so that two tokens
/// minted within the same second are still distinct strings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: String,
    pub user: UserLogin,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by login and refresh; the refresh token itself travels only in
/// the `refresh_token` cookie.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub user: UserLogin,
}
