use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::fs;
use tower_sessions::Session;

use crate::errors::AppResult;
use crate::middleware::SESSION_USER_KEY;
use crate::models::{LoginForm, SessionUser, SignupForm};
use crate::services::RedisStore;

pub async fn serve_login_page() -> impl IntoResponse {
    let login_html = fs::read_to_string("templates/login.html")
        .unwrap_or_else(|_| "Error loading login page".to_string());
    Html(login_html)
}

pub async fn serve_signup_page() -> impl IntoResponse {
    let signup_html = fs::read_to_string("templates/signup.html")
        .unwrap_or_else(|_| "Error loading signup page".to_string());
    Html(signup_html)
}

#[axum::debug_handler]
pub async fn handle_login(
    State(store): State<RedisStore>,
    session: Session,
    Form(login_form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Login attempt for user: {}", login_form.username);

    // Missing user and wrong password share one message, so the response
    // does not reveal whether the username exists.
    let user = match store.find_user(&login_form.username).await? {
        Some(user) if verify(&login_form.password, &user.password_hash).unwrap_or(false) => {
            user
        }
        _ => {
            tracing::info!("Invalid credentials for user: {}", login_form.username);
            return Ok(Redirect::to(&format!(
                "/login?error={}",
                urlencoding::encode("Invalid username or password")
            ))
            .into_response());
        }
    };

    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                id: user.id,
                username: user.username,
            },
        )
        .await?;

    tracing::info!("Authenticated user: {}", login_form.username);
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn handle_signup(
    State(store): State<RedisStore>,
    Form(signup_form): Form<SignupForm>,
) -> AppResult<Response> {
    if signup_form.username.trim().is_empty() || signup_form.password.is_empty() {
        return Ok(Redirect::to(&format!(
            "/signup?error={}",
            urlencoding::encode("Username and password are required")
        ))
        .into_response());
    }

    if signup_form.password != signup_form.confirm_password {
        return Ok(Redirect::to(&format!(
            "/signup?error={}",
            urlencoding::encode("Passwords don't match")
        ))
        .into_response());
    }

    let password_hash = hash(signup_form.password.as_bytes(), DEFAULT_COST)?;

    // A duplicate username surfaces from the store as DuplicateUsername and
    // redirects back to the form; the existing user is never overwritten.
    let user = store
        .create_user(signup_form.username.trim(), &password_hash)
        .await?;

    tracing::info!("Registered user: {}", user.username);

    // No auto-login: successful registration returns to the login form
    Ok(Redirect::to(&format!(
        "/login?notice={}",
        urlencoding::encode("Registration successful! Please login")
    ))
    .into_response())
}

#[axum::debug_handler]
pub async fn handle_logout(session: Session) -> Response {
    // Drops the whole session, not just the user binding. Without an active
    // session this is a no-op.
    session.clear().await;
    Redirect::to("/").into_response()
}
