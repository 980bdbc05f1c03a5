use crate::error::{AppError, AppResult};
use crate::oauth::client::OAuthClient;
use crate::oauth::session::AuthSession;
use crate::oauth::types::{CallbackParams, UserInfo};
use uuid::Uuid;

/// Issue a fresh nonce and return the provider URL the browser should visit.
pub fn begin_login(client: &OAuthClient, session: &mut AuthSession) -> String {
    let state = Uuid::new_v4().simple().to_string();
    session.begin_login(state.clone());

    client.authorization_url(&state)
}

pub async fn complete_login(
    client: &OAuthClient,
    session: &mut AuthSession,
    params: CallbackParams,
) -> AppResult<()> {
    // Consume the nonce before anything else so no callback can reuse it
    let expected = session.take_state();

    if let Some(error) = params.error {
        return Err(AppError::Unauthorized(format!("Provider refused login: {}", error)));
    }

    match (expected, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        (None, _) => return Err(AppError::Forbidden("No login in progress".to_string())),
        _ => return Err(AppError::Forbidden("OAuth state mismatch".to_string())),
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    let token = client.exchange_code(&code).await?;
    session.store_token(token);

    tracing::info!("OAuth login completed");
    Ok(())
}

pub fn logout(session: &mut AuthSession) {
    session.clear();
}

/// Profile of the logged-in user, asked from the provider on every call.
pub async fn fetch_profile(client: &OAuthClient, session: &AuthSession) -> AppResult<UserInfo> {
    let token = session
        .token()
        .ok_or_else(|| AppError::Unauthorized("User must be logged in".to_string()))?;

    Ok(client.fetch_user_info(token).await?)
}
