// src/auth/sessions.rs
//! Session lifecycle: register, login, refresh rotation, logout, and the
//! OAuth2 account bridge.
//!
//! Invariant: at most one valid refresh token per account. Every issuance
//! overwrites the stored value, so presenting a superseded token always fails
//! the exact-match lookup even while its signature is still valid.

use std::sync::Arc;

use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::models::UserLogin;
use super::tokens::TokenIssuer;
use crate::common::safe_email_log;
use crate::users::models::UserAccount;
use crate::users::store::UserStore;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid password")]
    BadCredentials,
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A freshly established session: token pair plus the user projection.
#[derive(Debug)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserLogin,
}

pub struct SessionManager {
    store: UserStore,
    tokens: Arc<TokenIssuer>,
    bcrypt_cost: u32,
}

impl SessionManager {
    pub fn new(store: UserStore, tokens: Arc<TokenIssuer>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Creates a password account. No tokens are issued here; the client logs
    /// in afterwards.
    pub async fn register(
        &self,
        name: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AuthError> {
        if self.store.email_exists(email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let account = self.store.insert(name, email, &password_hash).await?;

        info!(
            user_id = account.id,
            email = %safe_email_log(email),
            "Registered new account"
        );

        Ok(account)
    }

    /// Verifies credentials and establishes a session. The new refresh token
    /// overwrites any previously stored one, revoking it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !bcrypt::verify(password, &account.password_hash)? {
            warn!(email = %safe_email_log(email), "Login failed: bad credentials");
            return Err(AuthError::BadCredentials);
        }

        let session = self.establish(&account).await?;
        info!(user_id = account.id, email = %safe_email_log(email), "User logged in");
        Ok(session)
    }

    /// Rotating refresh with single-use semantics.
    ///
    /// Any failure - bad signature, expiry, or an exact-match miss against the
    /// stored value - collapses to `Ok(None)`. Callers cannot tell expired
    /// from revoked from forged; that uniformity is deliberate.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Option<Session>, AuthError> {
        let claims = match self.tokens.verify_and_decode(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Refresh token failed signature/expiry check");
                return Ok(None);
            }
        };

        let email = claims.sub;

        // Exact match against the stored value is the revocation check: a
        // rotated-out token decodes fine but no longer matches.
        if self
            .store
            .find_by_refresh_token_and_email(refresh_token, &email)
            .await?
            .is_none()
        {
            debug!(email = %safe_email_log(&email), "Refresh token superseded or unknown");
            return Ok(None);
        }

        // Reload for up-to-date profile data rather than trusting the claims.
        let account = match self.store.find_by_email(&email).await? {
            Some(account) => account,
            None => return Ok(None),
        };

        let session = self.establish(&account).await?;
        debug!(user_id = account.id, "Refresh token rotated");
        Ok(Some(session))
    }

    /// Clears the stored refresh token, permanently invalidating any
    /// outstanding one for this account.
    pub async fn logout(&self, email: &str) -> Result<(), AuthError> {
        self.store.update_refresh_token(email, None).await?;
        info!(email = %safe_email_log(email), "User logged out");
        Ok(())
    }

    /// OAuth2 bridge: maps an externally verified identity onto the store.
    ///
    /// First sight creates an account with a random password, so the account
    /// cannot be entered through the password flow with any guessable value.
    /// Afterwards this behaves exactly like login's post-authentication phase.
    pub async fn complete_oauth_login(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<Session, AuthError> {
        let account = match self.store.find_by_email(email).await? {
            Some(account) => account,
            None => {
                let password_hash = bcrypt::hash(random_password(), self.bcrypt_cost)?;
                let account = self.store.insert(name, email, &password_hash).await?;
                info!(
                    user_id = account.id,
                    email = %safe_email_log(email),
                    "Created account from OAuth login"
                );
                account
            }
        };

        self.establish(&account).await
    }

    /// Post-authentication phase shared by login, refresh, and the OAuth
    /// bridge: mint the pair, persist the refresh token.
    async fn establish(&self, account: &UserAccount) -> Result<Session, AuthError> {
        let user = UserLogin {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
        };

        let access_token = self.tokens.issue_access_token(&account.email, &user)?;
        let refresh_token = self.tokens.issue_refresh_token(&account.email, &user)?;

        self.store
            .update_refresh_token(&account.email, Some(&refresh_token))
            .await?;

        Ok(Session {
            access_token,
            refresh_token,
            user,
        })
    }
}

fn random_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
