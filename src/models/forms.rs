use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// JSON body for task create/update. Fields are optional so that a missing
// field is reported as a 400 with our error shape instead of an axum
// deserialization rejection; the accounting core checks presence.
#[derive(Debug, Deserialize, Default)]
pub struct TaskPayload {
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
