use crate::error::AppResult;
use crate::oauth::flow;
use crate::oauth::session::AuthSession;
use crate::oauth::types::{CallbackParams, UserInfo};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

// `Redirect::to` answers 303; browsers and the provider expect a plain 302 here.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// GET /
pub async fn index(State(state): State<AppState>, auth: AuthSession) -> AppResult<String> {
    if !auth.is_authenticated() {
        return Ok("You are not currently logged in".to_string());
    }

    let profile = flow::fetch_profile(&state.oauth, &auth).await?;
    Ok(format!("You are currently logged in as {}", profile.display_name()))
}

/// GET /google/login
pub async fn login(State(state): State<AppState>, mut auth: AuthSession) -> Response {
    let uri = flow::begin_login(&state.oauth, &mut auth);

    (auth, found(&uri)).into_response()
}

/// GET /google/auth
///
/// The session goes back to the browser on failure too, so a consumed nonce
/// stays consumed.
pub async fn callback(
    State(state): State<AppState>,
    mut auth: AuthSession,
    Query(params): Query<CallbackParams>,
) -> Response {
    match flow::complete_login(&state.oauth, &mut auth, params).await {
        Ok(()) => (auth, found(&state.config.base_uri)).into_response(),
        Err(e) => (auth, e).into_response(),
    }
}

/// GET /google/logout
pub async fn logout(State(state): State<AppState>, mut auth: AuthSession) -> Response {
    flow::logout(&mut auth);

    (auth, found(&state.config.base_uri)).into_response()
}

/// GET /api/profile (behind `require_auth`)
pub async fn profile(State(state): State<AppState>, auth: AuthSession) -> AppResult<Json<UserInfo>> {
    let profile = flow::fetch_profile(&state.oauth, &auth).await?;

    Ok(Json(profile))
}
