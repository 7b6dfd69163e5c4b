//! Authentication handlers

use axum::{
    extract::{Extension, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::extractors::AuthedUser;
use super::models::{LoginRequest, RegisterRequest, SessionResponse, UserLogin};
use super::validators::{LoginValidator, RegisterValidator};
use crate::common::{safe_email_log, safe_token_log, ApiError, AppState, Validator};
use crate::users::models::UserAccount;

/// Cookie name carrying the refresh token, shared by login/refresh/logout.
const REFRESH_COOKIE: &str = "refresh_token";

/// Sentinel the refresh endpoint substitutes for a missing cookie; treated
/// the same as an empty value.
const MISSING_COOKIE_SENTINEL: &str = "abc";

/// POST /api/v1/auth/register
/// Creates a new password account; no tokens are issued.
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserAccount>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = RegisterValidator.validate(&request);
    if !validation.is_valid {
        warn!(errors = ?validation.errors, "Register request failed validation");
        return Err(ApiError::from(validation));
    }

    let account = state
        .sessions
        .register(request.name.as_deref(), &request.email, &request.password)
        .await?;

    Ok(Json(account))
}

/// POST /api/v1/auth/login
///
/// On success the access token and user view come back in the body while the
/// refresh token is set as an HTTP-only cookie.
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = LoginValidator.validate(&request);
    if !validation.is_valid {
        return Err(ApiError::from(validation));
    }

    let session = state.sessions.login(&request.email, &request.password).await?;

    let cookie = refresh_cookie(&session.refresh_token, state.tokens.refresh_ttl_secs());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            access_token: session.access_token,
            user: session.user,
        }),
    ))
}

/// GET /api/v1/auth/refresh
///
/// Reads the refresh cookie, rotates the token, and answers with a new pair.
/// Whatever went wrong inside the rotation - malformed, expired, revoked - the
/// client sees one generic invalid-token error.
pub async fn refresh(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let token = refresh_token_from_headers(&headers)?;

    let session = match state.sessions.refresh(&token).await? {
        Some(session) => session,
        None => {
            warn!(token = %safe_token_log(&token), "Refresh rejected");
            return Err(ApiError::Unauthorized("Invalid refresh token".to_string()));
        }
    };

    let cookie = refresh_cookie(&session.refresh_token, state.tokens.refresh_ttl_secs());
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            access_token: session.access_token,
            user: session.user,
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Requires an authenticated principal; clears the stored refresh token and
/// expires the cookie.
pub async fn logout(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    state.sessions.logout(&authed.email).await?;

    Ok((
        [(header::SET_COOKIE, clear_refresh_cookie())],
        StatusCode::OK,
    ))
}

/// GET /api/v1/auth/account
/// Returns the current principal's minimal projection.
pub async fn get_account(authed: AuthedUser) -> Json<UserLogin> {
    Json(UserLogin {
        id: authed.id,
        email: authed.email,
        name: authed.name,
    })
}

#[derive(Deserialize)]
pub struct GoogleCallbackQuery {
    pub id_token: String,
}

/// GET /api/v1/auth/google/callback
///
/// Verifies the Google ID token against the tokeninfo endpoint, maps the
/// confirmed identity onto an account (creating it on first sight), and
/// redirects to the frontend with the access token in the query string and
/// the refresh token in the cookie.
pub async fn google_callback(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<GoogleCallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let (email, name) = verify_google_id_token(&state, &params.id_token).await?;

    let session = state
        .sessions
        .complete_oauth_login(&email, name.as_deref())
        .await?;

    info!(
        user_id = session.user.id,
        email = %safe_email_log(&email),
        provider = "google",
        "OAuth login completed"
    );

    let redirect_url = format!(
        "{}/login?oauth=success&provider=google&email={}&name={}&access_token={}",
        state.frontend_url,
        urlencoding::encode(&session.user.email),
        urlencoding::encode(session.user.name.as_deref().unwrap_or("")),
        urlencoding::encode(&session.access_token),
    );

    let cookie = refresh_cookie(&session.refresh_token, state.tokens.refresh_ttl_secs());
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&redirect_url)))
}

/// Validates an ID token with Google's tokeninfo endpoint and extracts the
/// verified email and display name.
///
/// Docs: https://developers.google.com/identity/sign-in/web/backend-auth
async fn verify_google_id_token(
    state: &AppState,
    id_token: &str,
) -> Result<(String, Option<String>), ApiError> {
    let tokeninfo_url = format!(
        "https://oauth2.googleapis.com/tokeninfo?id_token={}",
        id_token
    );

    let resp = state.http.get(&tokeninfo_url).send().await.map_err(|e| {
        error!(error = %e, "HTTP error contacting Google tokeninfo endpoint");
        ApiError::ServiceUnavailable("google token validation service unavailable".to_string())
    })?;

    let status = resp.status();
    if !status.is_success() {
        warn!(http_status = %status, "Google tokeninfo rejected the id_token");
        return Err(ApiError::Unauthorized(
            "invalid or expired id_token".to_string(),
        ));
    }

    let body: serde_json::Value = resp.json().await.map_err(|e| {
        error!(error = %e, "Failed to parse Google tokeninfo response");
        ApiError::BadRequest("malformed id_token".to_string())
    })?;

    let email = body
        .get("email")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            warn!("Google token missing required email field");
            ApiError::BadRequest("token missing required fields".to_string())
        })?;

    let name = body
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if let Some(false) = body.get("email_verified").and_then(|v| v.as_bool()) {
        warn!(email = %safe_email_log(&email), "Google token carries an unverified email");
    }

    // Audience (client id) check when configured
    if let Some(client_id) = &state.google_client_id {
        match body.get("aud").and_then(|v| v.as_str()) {
            Some(aud) if aud == client_id => {}
            Some(_) => {
                warn!("Google token audience mismatch - rejecting token");
                return Err(ApiError::Unauthorized("token audience mismatch".to_string()));
            }
            None => {
                warn!("Google token missing audience field - rejecting token");
                return Err(ApiError::Unauthorized("token missing audience".to_string()));
            }
        }
    }

    Ok((email, name))
}

/// Pulls the refresh token out of the cookie header. A missing cookie, an
/// empty value, or the missing-cookie sentinel is a 400 before any refresh
/// attempt is made.
fn refresh_token_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let token = cookie_value(headers, REFRESH_COOKIE)
        .unwrap_or_else(|| MISSING_COOKIE_SENTINEL.to_string());

    if token == MISSING_COOKIE_SENTINEL || token.is_empty() {
        debug!("Refresh called without a refresh token cookie");
        return Err(ApiError::BadRequest(
            "No refresh token cookie present".to_string(),
        ));
    }

    Ok(token)
}

// ---- Cookie helpers ----

fn refresh_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; Secure; Path=/; Max-Age={}",
        REFRESH_COOKIE, token, max_age_secs
    )
}

fn clear_refresh_cookie() -> String {
    refresh_cookie("", 0)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("tok123", 86400);
        assert!(cookie.starts_with("refresh_token=tok123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_refresh_cookie();
        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_refresh_rejects_absent_sentinel_and_empty_cookie() {
        // No cookie header at all.
        let missing = refresh_token_from_headers(&HeaderMap::new());
        assert!(matches!(missing, Err(ApiError::BadRequest(_))));

        // The sentinel value stands in for a missing cookie.
        let sentinel = refresh_token_from_headers(&cookie_headers("refresh_token=abc"));
        assert!(matches!(sentinel, Err(ApiError::BadRequest(_))));

        // An empty value is just as invalid.
        let empty = refresh_token_from_headers(&cookie_headers("refresh_token="));
        assert!(matches!(empty, Err(ApiError::BadRequest(_))));

        // A real value passes through untouched.
        let token = refresh_token_from_headers(&cookie_headers("refresh_token=abc.def.ghi"));
        assert_eq!(token.unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_cookie_value_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; refresh_token=abc.def.ghi; lang=en".parse().unwrap(),
        );
        assert_eq!(
            cookie_value(&headers, "refresh_token"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(cookie_value(&headers, "session"), None);

        let empty = HeaderMap::new();
        assert_eq!(cookie_value(&empty, "refresh_token"), None);
    }
}
