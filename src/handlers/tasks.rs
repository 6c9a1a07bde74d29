use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::accounting::{authorize_owned, validate_task_payload};
use crate::errors::AppResult;
use crate::middleware::current_user;
use crate::models::{TaskPayload, TaskRepr};
use crate::services::RedisStore;

pub async fn list_tasks(
    State(store): State<RedisStore>,
    session: Session,
) -> AppResult<Response> {
    let user = current_user(&session).await?;
    tracing::debug!("Listing tasks for user {}", user.id);

    let tasks = store.find_tasks_by_owner(user.id).await?;
    let reprs: Vec<TaskRepr> = tasks.iter().map(TaskRepr::from).collect();
    Ok(Json(reprs).into_response())
}

#[axum::debug_handler]
pub async fn create_task(
    State(store): State<RedisStore>,
    session: Session,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> AppResult<Response> {
    let user = current_user(&session).await?;

    let Json(payload) = payload?;
    let input = validate_task_payload(&payload)?;
    let task = store.create_task(user.id, input).await?;

    tracing::info!(
        "Created task {} for user {} ({} minutes)",
        task.id,
        user.id,
        task.duration_minutes
    );
    Ok((StatusCode::CREATED, Json(TaskRepr::from(&task))).into_response())
}

pub async fn update_task(
    State(store): State<RedisStore>,
    session: Session,
    Path(task_id): Path<i64>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> AppResult<Response> {
    let user = current_user(&session).await?;

    // Existence and ownership are checked together before the payload is
    // even validated; foreign ids read as nonexistent.
    let mut task = authorize_owned(store.find_task(task_id).await?, user.id)?;

    let Json(payload) = payload?;
    let input = validate_task_payload(&payload)?;
    task.title = input.title;
    task.start_time = input.start_time;
    task.end_time = input.end_time;
    task.duration_minutes = input.duration_minutes;

    store.update_task(&task).await?;

    tracing::info!("Updated task {} for user {}", task.id, user.id);
    Ok(Json(TaskRepr::from(&task)).into_response())
}

pub async fn delete_task(
    State(store): State<RedisStore>,
    session: Session,
    Path(task_id): Path<i64>,
) -> AppResult<Response> {
    let user = current_user(&session).await?;

    let task = authorize_owned(store.find_task(task_id).await?, user.id)?;
    store.delete_task(&task).await?;

    tracing::info!("Deleted task {} for user {}", task_id, user.id);
    Ok(Json(json!({ "status": "deleted", "id": task_id })).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::body::{to_bytes, Body};
    use axum::extract::FromRequest;
    use axum::http::Request;

    async fn rejection_for(body: Body, content_type: &str) -> AppError {
        let request = Request::builder()
            .method("POST")
            .header("content-type", content_type)
            .body(body)
            .unwrap();
        Json::<TaskPayload>::from_request(request, &())
            .await
            .unwrap_err()
            .into()
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_error_shape() {
        let error = rejection_for(Body::from("{not json"), "application/json").await;
        assert!(matches!(&error, AppError::InvalidInput(_)));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_content_type_keeps_error_shape() {
        let error = rejection_for(Body::from("title=x"), "text/plain").await;

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].is_string());
    }
}
