// Defines the application error taxonomy and a result type alias using the
// thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Task not found")]
    NotFound,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    // The #[from] attribute converts a redis::RedisError into
    // AppError::Storage via the From trait.
    #[error("Storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("Template error: {0}")]
    Template(#[from] std::io::Error),

    #[error("Password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

// A body axum could not deserialize (bad syntax, wrong content-type) is
// malformed input, so it keeps the {"error": ...} response shape.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
