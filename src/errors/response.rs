use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::json;

use crate::errors::AppError;

// Converts AppError into a well-formed HTTP response. Task endpoints get the
// JSON error shape {"error": ...}; the signup form flow gets a redirect back
// to the form with an url-encoded message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => {
                error_json(StatusCode::UNAUTHORIZED, "Unauthorized")
            }

            AppError::InvalidInput(msg) => error_json(StatusCode::BAD_REQUEST, &msg),

            // A task owned by someone else is reported identically to a task
            // that does not exist.
            AppError::NotFound => error_json(StatusCode::NOT_FOUND, "Task not found"),

            AppError::DuplicateUsername => Redirect::to(&format!(
                "/signup?error={}",
                urlencoding::encode("Username already taken")
            ))
            .into_response(),

            // Internal failures are logged in full and surfaced generically
            AppError::Session(e) => {
                tracing::error!("Session error: {}", e);
                error_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }

            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                error_json(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure")
            }

            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                error_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }

            AppError::Hash(e) => {
                tracing::error!("Password hash error: {}", e);
                error_json(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
