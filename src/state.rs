//! # Application State
//!
//! This module defines the shared state that's accessible to all request handlers.
//! In Axum, state is how you share resources (database connections, configuration, etc.)
//! across different parts of your application.
//!
//! ## The State Pattern
//! Instead of creating new database connections for each request, we:
//! 1. Create a connection pool once at startup
//! 2. Store it in AppState
//! 3. Share it across all request handlers
//! 4. Axum clones the state for each request (cheap because we use Arc)

use crate::config::Config;
use crate::db;
use crate::oauth::client::OAuthClient;
use crate::oauth::session::CookieSettings;
use anyhow::Result;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use time::Duration;

/// Shared application state
///
/// - `db`: the movie table's connection pool
/// - `oauth`: client for the provider's token and user-info endpoints
/// - `config`: the configuration loaded at startup (base URI for redirects, etc.)
/// - `session_key`: encrypts and authenticates the session cookie
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `SqlitePool` is already reference counted, so cloning it is cheap.
    pub db: SqlitePool,

    /// OAuth2 provider client
    ///
    /// Holds one `reqwest::Client` so connections to the provider are reused.
    pub oauth: Arc<OAuthClient>,

    /// Configuration loaded once at startup
    pub config: Arc<Config>,

    /// Derived from `FN_SESSION_SECRET`; any process with the same secret
    /// accepts the same cookies.
    pub session_key: Key,
}

impl AppState {
    /// Initialize application state
    ///
    /// This function:
    /// 1. Connects to the SQLite database
    /// 2. Creates the `movie` table if it does not exist yet
    /// 3. Builds the OAuth provider client and the session cookie key
    ///
    /// # Errors
    /// Returns an error if the database is unreachable, the schema statement
    /// fails, the HTTP client cannot be built, or the session secret is unusable.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;
        db::init_schema(&db).await?;

        Self::with_pool(db, config)
    }

    /// Assemble state around an existing pool (the schema must already exist)
    pub fn with_pool(db: SqlitePool, config: &Config) -> Result<Self> {
        let oauth = Arc::new(OAuthClient::new(config)?);
        let session_key = config.session_key()?;

        Ok(AppState {
            db,
            oauth,
            config: Arc::new(config.clone()),
            session_key,
        })
    }

    /// Attributes every session cookie is written with
    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings {
            lifetime: Duration::days(self.config.session_lifetime_days),
            secure: self.config.secure_cookies(),
        }
    }
}

// Lets `PrivateCookieJar` find its key in the router state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
