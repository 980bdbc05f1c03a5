use crate::config::Config;
use crate::oauth::types::{TokenSet, UserInfo};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("provider returned HTTP {status}: {body}")]
    ProviderRejected { status: StatusCode, body: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Client for one OAuth2 provider
///
/// Holds the client credentials and endpoint URLs from the configuration and a
/// shared `reqwest::Client` with the configured timeout.
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    authorization_url: String,
    token_url: String,
    userinfo_url: String,
    scope: String,
}

impl OAuthClient {
    pub fn new(config: &Config) -> Result<Self, OAuthError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.auth_redirect_uri.clone(),
            authorization_url: config.authorization_url.clone(),
            token_url: config.token_url.clone(),
            userinfo_url: config.userinfo_url.clone(),
            scope: config.scope.clone(),
        })
    }

    /// Authorization URL the browser is sent to, carrying `state` as the nonce
    pub fn authorization_url(&self, state: &str) -> String {
        // The Google default already carries `access_type` and `prompt`
        let separator = if self.authorization_url.contains('?') { '&' } else { '?' };

        format!(
            "{}{}response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
            self.authorization_url,
            separator,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scope),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, OAuthError> {
        let params = [
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!("Exchanging authorization code for tokens");

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %body, "Token exchange failed");
            return Err(OAuthError::ProviderRejected { status, body });
        }

        response
            .json::<TokenSet>()
            .await
            .map_err(|e| OAuthError::InvalidResponse(e.to_string()))
    }

    /// Fetch the profile of the user the access token belongs to
    pub async fn fetch_user_info(&self, token: &TokenSet) -> Result<UserInfo, OAuthError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| OAuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %body, "User info request failed");
            return Err(OAuthError::ProviderRejected { status, body });
        }

        response
            .json::<UserInfo>()
            .await
            .map_err(|e| OAuthError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::tests::base_vars;
    use axum::{
        extract::{Form, State},
        http::{HeaderMap, StatusCode as AxumStatus},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    pub(crate) const GOOD_CODE: &str = "good-code";
    pub(crate) const ACCESS_TOKEN: &str = "access-123";

    async fn token_endpoint(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        let valid = form.get("grant_type").map(String::as_str) == Some("authorization_code")
            && form.get("client_secret").map(String::as_str) == Some("client-secret")
            && form.get("code").map(String::as_str) == Some(GOOD_CODE);

        if !valid {
            return (AxumStatus::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })));
        }

        (
            AxumStatus::OK,
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "refresh_token": "refresh-456",
                "expires_in": 3599,
                "token_type": "Bearer",
                "scope": "openid email profile",
            })),
        )
    }

    async fn userinfo_endpoint(State(revoked): State<Arc<AtomicBool>>, headers: HeaderMap) -> impl IntoResponse {
        let expected = format!("Bearer {ACCESS_TOKEN}");
        match headers.get("authorization").and_then(|v| v.to_str().ok()) {
            Some(value) if value == expected && !revoked.load(Ordering::SeqCst) => (
                AxumStatus::OK,
                Json(json!({ "given_name": "Ada", "email": "ada@example.com" })),
            ),
            _ => (AxumStatus::UNAUTHORIZED, Json(json!({ "error": "invalid_token" }))),
        }
    }

    async fn revoke_endpoint(State(revoked): State<Arc<AtomicBool>>) -> AxumStatus {
        revoked.store(true, Ordering::SeqCst);
        AxumStatus::OK
    }

    /// Start a stand-in provider on an ephemeral port and return its base URL.
    ///
    /// `POST /revoke` invalidates the access token for every later `/userinfo` call.
    pub(crate) async fn spawn_mock_provider() -> String {
        let app = Router::new()
            .route("/token", post(token_endpoint))
            .route("/userinfo", get(userinfo_endpoint))
            .route("/revoke", post(revoke_endpoint))
            .with_state(Arc::new(AtomicBool::new(false)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    /// Invalidate the access token at the stand-in provider.
    pub(crate) async fn revoke_token(provider: &str) {
        reqwest::Client::new()
            .post(format!("{provider}/revoke"))
            .send()
            .await
            .unwrap();
    }

    /// Configuration whose provider endpoints point at `provider`.
    pub(crate) fn config_for(provider: &str) -> Config {
        let mut vars = base_vars();
        vars.insert("FN_AUTHORIZATION_URL".into(), format!("{provider}/authorize"));
        vars.insert("FN_TOKEN_URL".into(), format!("{provider}/token"));
        vars.insert("FN_USERINFO_URL".into(), format!("{provider}/userinfo"));
        Config::from_vars(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_authorization_url_carries_client_and_state() {
        let client = OAuthClient::new(&config_for("http://provider.test")).unwrap();

        let url = client.authorization_url("nonce-1");

        assert!(url.starts_with("http://provider.test/authorize?response_type=code&"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fgoogle%2Fauth"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.ends_with("&state=nonce-1"));
    }

    #[test]
    fn test_authorization_url_extends_existing_query() {
        let config = Config::from_vars(|key| base_vars().get(key).cloned()).unwrap();
        let client = OAuthClient::new(&config).unwrap();

        let url = client.authorization_url("nonce-1");

        assert!(url.starts_with(
            "https://accounts.google.com/o/oauth2/v2/auth?access_type=offline&prompt=consent&response_type=code&"
        ));
    }

    #[tokio::test]
    async fn test_exchange_code_returns_tokens() {
        let provider = spawn_mock_provider().await;
        let client = OAuthClient::new(&config_for(&provider)).unwrap();

        let token = client.exchange_code(GOOD_CODE).await.unwrap();

        assert_eq!(token.access_token, ACCESS_TOKEN);
        assert_eq!(token.refresh_token.as_deref(), Some("refresh-456"));
        assert_eq!(token.expires_in, Some(3599));
    }

    #[tokio::test]
    async fn test_exchange_code_surfaces_provider_rejection() {
        let provider = spawn_mock_provider().await;
        let client = OAuthClient::new(&config_for(&provider)).unwrap();

        let err = client.exchange_code("stale-code").await.unwrap_err();

        match err {
            OAuthError::ProviderRejected { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_user_info_uses_bearer_token() {
        let provider = spawn_mock_provider().await;
        let client = OAuthClient::new(&config_for(&provider)).unwrap();
        let token = client.exchange_code(GOOD_CODE).await.unwrap();

        let info = client.fetch_user_info(&token).await.unwrap();

        assert_eq!(info.display_name(), "Ada");
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected_by_user_info() {
        let provider = spawn_mock_provider().await;
        let client = OAuthClient::new(&config_for(&provider)).unwrap();
        let token = client.exchange_code(GOOD_CODE).await.unwrap();
        revoke_token(&provider).await;

        let err = client.fetch_user_info(&token).await.unwrap_err();

        assert!(matches!(err, OAuthError::ProviderRejected { status, .. } if status == StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_request_failure() {
        // Nothing listens on port 9 of localhost
        let client = OAuthClient::new(&config_for("http://127.0.0.1:9")).unwrap();

        let err = client.exchange_code(GOOD_CODE).await.unwrap_err();

        assert!(matches!(err, OAuthError::RequestFailed(_)));
    }
}
