use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::errors::{AppError, AppResult};
use crate::models::SessionUser;

pub const SESSION_USER_KEY: &str = "current_user";

pub async fn require_auth(
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    // Logout is public so that clearing a nonexistent session stays a no-op
    let is_public = path == "/"
        || path == "/login"
        || path == "/signup"
        || path == "/logout"
        || path.starts_with("/static");
    let is_api = path.starts_with("/tasks");

    if is_public {
        return next.run(req).await;
    }

    match session.get::<SessionUser>(SESSION_USER_KEY).await {
        Ok(Some(_)) => next.run(req).await,
        // API callers get the JSON error shape, page loads go to the login form
        _ if is_api => AppError::Unauthorized.into_response(),
        _ => Redirect::to("/login").into_response(),
    }
}

// Session accessor used by handlers; fails with Unauthorized before any
// store access happens.
pub async fn current_user(session: &Session) -> AppResult<SessionUser> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await?
        .ok_or(AppError::Unauthorized)
}
