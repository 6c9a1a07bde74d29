use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;

use crate::errors::{AppError, AppResult};
use crate::middleware::current_user;
use crate::services::RedisStore;

pub async fn serve_dashboard(
    State(store): State<RedisStore>,
    session: Session,
) -> AppResult<Response> {
    let user = current_user(&session).await?;
    tracing::info!("Rendering dashboard for user: {}", user.username);

    // Insertion order, as the store returns it
    let tasks = store.find_tasks_by_owner(user.id).await?;

    let dashboard_html = std::fs::read_to_string("templates/dashboard.html")
        .map_err(|e| {
            tracing::error!("Failed to read dashboard template: {}", e);
            AppError::Template(e)
        })?;

    let tasks_html = tasks
        .iter()
        .map(|task| {
            format!(
                r#"<tr data-task-id="{}">
                <td class="task-title">{}</td>
                <td class="task-start">{}</td>
                <td class="task-end">{}</td>
                <td>{} min</td>
                <td class="action-cell">
                    <button class="edit-btn" data-id="{}">Edit</button>
                    <button class="delete-btn" data-id="{}">Delete</button>
                </td>
            </tr>"#,
                task.id,
                escape_html(&task.title),
                task.start_time.format("%Y-%m-%d %H:%M"),
                task.end_time.format("%Y-%m-%d %H:%M"),
                task.duration_minutes,
                task.id,
                task.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let dashboard_html = dashboard_html
        .replace("{{username}}", &escape_html(&user.username))
        .replace("{{tasks}}", &tasks_html)
        .replace("{{task_count}}", &tasks.len().to_string());

    Ok(Html(dashboard_html).into_response())
}

// Titles are user input and land inside table cells
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
