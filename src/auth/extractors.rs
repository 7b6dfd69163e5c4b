//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::common::{safe_email_log, ApiError, AppState};

/// The current principal: identity of the in-flight authenticated request.
///
/// Built per request from the Bearer access token, never stored globally, so
/// concurrently handled requests cannot observe each other's identity.
#[derive(Debug)]
pub struct AuthedUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        // Handle "Bearer <token>" format or raw token
        let bare_token = token.strip_prefix("Bearer ").unwrap_or(&token);

        let claims = app_state.tokens.verify_and_decode(bare_token).map_err(|e| {
            warn!(error = %e, "Access token validation failed");
            ApiError::Unauthorized("invalid token".into())
        })?;

        // Look the account up so a deleted user cannot keep acting on a
        // still-valid access token.
        let account = app_state
            .store
            .find_by_email(&claims.sub)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error during principal lookup");
                ApiError::DatabaseError(e)
            })?;

        match account {
            Some(u) => {
                debug!(
                    user_id = u.id,
                    email = %safe_email_log(&u.email),
                    "Request authenticated"
                );
                Ok(AuthedUser {
                    id: u.id,
                    email: u.email,
                    name: u.name,
                })
            }
            None => {
                warn!(
                    email = %safe_email_log(&claims.sub),
                    "Authentication failed: account no longer exists"
                );
                Err(ApiError::Unauthorized("user not found".into()))
            }
        }
    }
}
