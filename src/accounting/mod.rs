//! Task accounting core: input validation, duration arithmetic, and the
//! per-user ownership check. Pure functions over parsed values; the caller
//! supplies the session identity explicitly, so none of this needs an HTTP
//! layer to exercise.

use chrono::NaiveDateTime;

use crate::errors::{AppError, AppResult};
use crate::models::{Task, TaskPayload};

/// Validated task fields ready to be written, with the duration derived.
#[derive(Debug, Clone)]
pub struct TaskInput {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
}

/// Computes the derived duration of a task in whole minutes.
///
/// # Arguments
///
/// * `start_time` - When the task begins.
/// * `end_time` - When the task ends.
///
/// # Returns
///
/// floor((end_time - start_time) in seconds / 60). An end before the start
/// yields a negative value; that is accepted, not rejected.
pub fn duration_minutes(start_time: NaiveDateTime, end_time: NaiveDateTime) -> i64 {
    (end_time - start_time).num_seconds().div_euclid(60)
}

/// Validates a task payload and derives its duration.
///
/// # Arguments
///
/// * `payload` - The raw JSON body of a create or update request.
///
/// # Returns
///
/// A `TaskInput` with parsed timestamps and the computed duration, or
/// `AppError::InvalidInput` when the title is missing/empty or either
/// timestamp is missing or not ISO-8601.
pub fn validate_task_payload(payload: &TaskPayload) -> AppResult<TaskInput> {
    // Blank titles are rejected, but an accepted title is stored verbatim,
    // surrounding whitespace included.
    let title = payload
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Title must not be empty".into()))?
        .to_string();

    let start_time = parse_timestamp(payload.start_time.as_deref(), "start_time")?;
    let end_time = parse_timestamp(payload.end_time.as_deref(), "end_time")?;

    Ok(TaskInput {
        title,
        start_time,
        end_time,
        duration_minutes: duration_minutes(start_time, end_time),
    })
}

// Missing and unparseable timestamps both come back as InvalidInput naming
// the offending field.
fn parse_timestamp(value: Option<&str>, field: &str) -> AppResult<NaiveDateTime> {
    let raw = value
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field: {}", field)))?;
    raw.parse::<NaiveDateTime>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid timestamp in {}: {}", field, raw)))
}

/// Combined existence + ownership check for update and delete.
///
/// # Arguments
///
/// * `task` - The store lookup result for the requested id.
/// * `user_id` - The session-bound id of the caller.
///
/// # Returns
///
/// The task when it exists and is owned by the caller. A task owned by
/// someone else and a nonexistent id are indistinguishable: both are
/// `AppError::NotFound`, so ids cannot be enumerated.
pub fn authorize_owned(task: Option<Task>, user_id: i64) -> AppResult<Task> {
    match task {
        Some(task) if task.owner_id == user_id => Ok(task),
        _ => Err(AppError::NotFound),
    }
}
