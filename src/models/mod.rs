mod forms;
mod task;
mod user;

pub use forms::{LoginForm, SignupForm, TaskPayload};
pub use task::{Task, TaskRepr};
pub use user::{SessionUser, User};
