// Application state shared across all modules

use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::sessions::SessionManager;
use crate::auth::tokens::TokenIssuer;
use crate::users::store::UserStore;

/// Application state containing database pool, services, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    pub store: UserStore,
    pub tokens: Arc<TokenIssuer>,
    pub sessions: Arc<SessionManager>,
    pub frontend_url: String,
    pub google_client_id: Option<String>,
}
