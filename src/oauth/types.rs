//! # OAuth Types
//!
//! Data exchanged with the provider and kept in the session.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tokens returned by the provider's token endpoint
///
/// Deserialized straight from the token response and stored in the session as-is.
///
/// ## Example provider response
/// ```json
/// {
///   "access_token": "ya29.a0AfH6SMC...",
///   "refresh_token": "1//0gLx...",
///   "expires_in": 3599,
///   "token_type": "Bearer",
///   "scope": "openid email profile"
/// }
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,

    /// Only issued when the authorization request asked for offline access
    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    #[serde(default)]
    pub expires_in: Option<i64>,

    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

// Tokens never show up in logs.
impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

/// Profile returned by the provider's user-info endpoint
///
/// Only `given_name` is read by the application; every other field is kept
/// verbatim and returned by `/api/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserInfo {
    /// Name shown on the index page
    pub fn display_name(&self) -> &str {
        self.given_name
            .as_deref()
            .or_else(|| self.other.get("name").and_then(Value::as_str))
            .or_else(|| self.other.get("email").and_then(Value::as_str))
            .unwrap_or("unknown user")
    }
}

/// Query string of the provider's redirect to `/google/auth`
///
/// On success the provider sends `state` and `code`; on refusal it sends
/// `state` and `error` (e.g. `access_denied`).
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}
