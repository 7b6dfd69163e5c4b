// src/auth/tokens.rs
//! Stateless JWT issuance and verification
//!
//! Access tokens are short-lived and checked by signature and expiry alone.
//! Refresh tokens use the same signing scheme with a long expiry; their
//! revocation check (exact match against the stored value) lives in the
//! session manager, not here.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};

use super::models::{Claims, UserLogin};

/// HS256 token issuer; signing key and lifetimes are loaded once at startup
/// and immutable afterwards.
pub struct TokenIssuer {
    secret: String,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        self.refresh_ttl_secs
    }

    /// Short-lived access token: claims = subject email + user view.
    pub fn issue_access_token(
        &self,
        subject_email: &str,
        user: &UserLogin,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(subject_email, user, self.access_ttl_secs)
    }

    /// Long-lived refresh token, same mechanism as the access token.
    pub fn issue_refresh_token(
        &self,
        subject_email: &str,
        user: &UserLogin,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(subject_email, user, self.refresh_ttl_secs)
    }

    fn issue(
        &self,
        subject_email: &str,
        user: &UserLogin,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_email.to_string(),
            user: user.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            jti: random_jti(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Signature and expiry check only; never consults storage.
    pub fn verify_and_decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }
}

fn random_jti() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
