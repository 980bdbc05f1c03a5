//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Required Environment Variables
//! - `DATABASE_URL`: SQLite database connection string
//! - `FN_AUTH_REDIRECT_URI`: Where the provider sends the browser back to (`/google/auth`)
//! - `FN_BASE_URI`: Application home page, target of post-login/logout redirects
//! - `FN_CLIENT_ID` / `FN_CLIENT_SECRET`: OAuth2 client credentials
//! - `FN_SESSION_SECRET`: Key the session cookie is encrypted and signed with (at least 64 bytes)
//!
//! ## Optional Environment Variables
//! - `HOST` (default: 127.0.0.1), `PORT` (default: 8080)
//! - `FN_AUTHORIZATION_URL`, `FN_TOKEN_URL`, `FN_USERINFO_URL`: provider endpoints (default: Google)
//! - `FN_HTTP_TIMEOUT_SECS` (default: 10)
//! - `FN_SESSION_LIFETIME_DAYS` (default: 31)

use anyhow::{anyhow, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use axum_extra::extract::cookie::Key;
use std::env;

/// Google's authorization endpoint, asking for a refresh token on every consent.
pub const GOOGLE_AUTHORIZATION_URL: &str =
    "https://accounts.google.com/o/oauth2/v2/auth?access_type=offline&prompt=consent";
pub const GOOGLE_TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const AUTHORIZATION_SCOPE: &str = "openid email profile";

/// Minimum length of the session secret, imposed by the cookie key.
const MIN_SESSION_SECRET_LEN: usize = 64;

/// Application configuration
///
/// Built once at startup and shared through `AppState`. Secrets are wrapped in
/// `SecretString`, so printing the config with `{:?}` shows `[REDACTED]` for them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    pub host: String,

    /// Server port number
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:movies.db?mode=rwc"
    pub database_url: String,

    /// Application base URI, the landing page after login and logout
    pub base_uri: String,

    /// Redirect URI registered with the provider (points at `/google/auth`)
    pub auth_redirect_uri: String,

    /// OAuth2 client id
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: SecretString,

    /// Secret the session cookie is encrypted and signed with
    pub session_secret: SecretString,

    /// Provider authorization endpoint (may already carry query parameters)
    pub authorization_url: String,

    /// Provider token endpoint
    pub token_url: String,

    /// Provider user-info endpoint
    pub userinfo_url: String,

    /// Scopes requested at login
    pub scope: String,

    /// Timeout for every outbound provider request, in seconds
    pub http_timeout_secs: u64,

    /// Max-Age of the session cookie, in days
    pub session_lifetime_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` first (if present) using dotenvy, then reads each value.
    /// Missing required variables and unparsable numbers are reported as errors.
    ///
    /// ## Example .env file
    /// ```text
    /// DATABASE_URL=sqlite:movies.db?mode=rwc
    /// FN_AUTH_REDIRECT_URI=http://localhost:8080/google/auth
    /// FN_BASE_URI=http://localhost:8080
    /// FN_CLIENT_ID=1234.apps.googleusercontent.com
    /// FN_CLIENT_SECRET=...
    /// FN_SESSION_SECRET=<64 or more random characters>
    /// ```
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("missing required environment variable {key}"))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            host: optional("HOST", "127.0.0.1"),
            port: optional("PORT", "8080").parse().context("PORT must be a port number")?,
            database_url: required("DATABASE_URL")?,
            base_uri: required("FN_BASE_URI")?,
            auth_redirect_uri: required("FN_AUTH_REDIRECT_URI")?,
            client_id: required("FN_CLIENT_ID")?,
            client_secret: SecretString::from(required("FN_CLIENT_SECRET")?),
            session_secret: SecretString::from(required("FN_SESSION_SECRET")?),
            authorization_url: optional("FN_AUTHORIZATION_URL", GOOGLE_AUTHORIZATION_URL),
            token_url: optional("FN_TOKEN_URL", GOOGLE_TOKEN_URL),
            userinfo_url: optional("FN_USERINFO_URL", GOOGLE_USERINFO_URL),
            scope: AUTHORIZATION_SCOPE.to_string(),
            http_timeout_secs: optional("FN_HTTP_TIMEOUT_SECS", "10")
                .parse()
                .context("FN_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            session_lifetime_days: optional("FN_SESSION_LIFETIME_DAYS", "31")
                .parse()
                .context("FN_SESSION_LIFETIME_DAYS must be a whole number of days")?,
        };

        // Fail at startup rather than on the first request
        config.session_key()?;

        Ok(config)
    }

    /// Get the socket address to bind the server to
    ///
    /// Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Key for the private session cookie
    pub fn session_key(&self) -> Result<Key> {
        let secret = self.session_secret.expose_secret().as_bytes();
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(anyhow!(
                "FN_SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes long"
            ));
        }
        Key::try_from(secret).map_err(|e| anyhow!("invalid FN_SESSION_SECRET: {e}"))
    }

    /// Only mark the session cookie `Secure` when the app is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.base_uri.starts_with("https://")
    }
}
