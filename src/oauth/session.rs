//! # Login Session
//!
//! The login state of one browser is an [`AuthSessionData`] record serialized
//! into a single private (encrypted and authenticated) cookie. Nothing about a
//! session is kept on the server, so any process holding the same key can read it.
//!
//! Handlers receive the state through the [`AuthSession`] extractor and hand it
//! back in their response, which writes (or removes) the cookie.

use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use time::Duration;

use crate::oauth::types::{TokenSet, UserInfo};

/// Name of the cookie carrying the login state
pub const SESSION_COOKIE_NAME: &str = "movie_session";

/// Everything the login flow remembers about a browser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSessionData {
    /// Tokens from the last successful callback; present means logged in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<TokenSet>,

    /// Nonce issued by the last `/google/login`, waiting for its callback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_state: Option<String>,

    /// Profile slot; never written by the flow, only cleared at logout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
}

impl AuthSessionData {
    fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.auth_state.is_none() && self.user_info.is_none()
    }
}

/// Cookie attributes, taken from the configuration
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub lifetime: Duration,
    pub secure: bool,
}

/// Typed login state of the current request
pub struct AuthSession {
    jar: PrivateCookieJar,
    data: AuthSessionData,
    settings: CookieSettings,
    changed: bool,
}

impl AuthSession {
    /// Read the login state from the request's cookies
    ///
    /// A cookie that fails to decrypt or parse counts as an anonymous session.
    pub fn from_jar(jar: PrivateCookieJar, settings: CookieSettings) -> Self {
        let data = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| match serde_json::from_str(cookie.value()) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!("Discarding unreadable session cookie: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            jar,
            data,
            settings,
            changed: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.auth_token.is_some()
    }

    pub fn token(&self) -> Option<&TokenSet> {
        self.data.auth_token.as_ref()
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        self.data.user_info.as_ref()
    }

    /// Remember the nonce of a new login attempt, replacing any earlier one.
    pub fn begin_login(&mut self, state: String) {
        self.data.auth_state = Some(state);
        self.changed = true;
    }

    /// Remove and return the pending nonce; a nonce is only ever good for one callback.
    pub fn take_state(&mut self) -> Option<String> {
        let state = self.data.auth_state.take();
        if state.is_some() {
            self.changed = true;
        }
        state
    }

    pub fn store_token(&mut self, token: TokenSet) {
        self.data.auth_token = Some(token);
        self.changed = true;
    }

    /// Forget tokens, pending nonce and profile.
    pub fn clear(&mut self) {
        self.data = AuthSessionData::default();
        self.changed = true;
    }

    /// The cookie jar with the current state written into it
    pub fn into_jar(self) -> PrivateCookieJar {
        if !self.changed {
            return self.jar;
        }

        if self.data.is_empty() {
            return self.jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
        }

        let value = match serde_json::to_string(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Could not serialize session: {}", e);
                return self.jar;
            }
        };

        let cookie = Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            // Lax so the cookie comes back on the provider's redirect to /google/auth
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .max_age(self.settings.lifetime);

        self.jar.add(cookie)
    }
}

impl IntoResponseParts for AuthSession {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.into_jar().into_response_parts(res)
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        Ok(Self::from_jar(jar, state.cookie_settings()))
    }
}
