use crate::error::AppError;
use crate::oauth::session::AuthSession;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

pub async fn require_auth(
    auth: AuthSession,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth.is_authenticated() {
        Ok(next.run(request).await)
    } else {
        Err(AppError::Unauthorized("Not authenticated".to_string()))
    }
}
