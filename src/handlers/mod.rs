mod auth;
mod dashboard;
mod tasks;

pub use auth::{handle_login, handle_logout, handle_signup, serve_login_page, serve_signup_page};
pub use dashboard::serve_dashboard;
pub use tasks::{create_task, delete_task, list_tasks, update_task};
