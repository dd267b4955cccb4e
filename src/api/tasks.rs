//! Task CRUD endpoints.
//!
//! Request bodies deserialize into [`TaskPayload`], whose fields stay as
//! raw JSON values so that wrong-typed fields reach the validation layer
//! and produce the specific error message instead of an extractor
//! rejection.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::task::{Priority, Task};

use super::error::ApiError;
use super::routes::AppState;

/// Body for create and update requests. Every field is optional at the
/// parse stage; the handlers decide which ones are required.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPayload {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub completed: Option<Value>,
    pub priority: Option<Value>,
}

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter on completion status; only the literal string "true"
    /// selects completed tasks, anything else selects incomplete ones.
    completed: Option<String>,
    /// `sort=createdAt` orders by ascending id (creation-order proxy).
    sort: Option<String>,
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

/// Extract a trimmed, non-empty string from a JSON value.
fn text_field(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn priority_field(value: &Value) -> Result<Priority, ApiError> {
    value
        .as_str()
        .and_then(Priority::parse)
        .ok_or(ApiError::InvalidPriority)
}

/// `GET /tasks` - list all tasks, with optional filtering and sorting.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Task>> {
    let mut tasks = state.store.list().await;

    if let Some(completed) = &query.completed {
        let wanted = completed == "true";
        tasks.retain(|t| t.completed == wanted);
    }

    if query.sort.as_deref() == Some("createdAt") {
        tasks.sort_by_key(|t| t.id);
    }

    Json(tasks)
}

/// `GET /tasks/:id` - fetch a single task.
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    state.store.find(id).await.map(Json).ok_or(ApiError::NotFound)
}

/// `POST /tasks` - create a new task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TaskPayload>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let (Some(title), Some(description), Some(completed)) =
        (&payload.title, &payload.description, &payload.completed)
    else {
        return Err(ApiError::MissingFields);
    };

    let title = text_field(title).ok_or(ApiError::InvalidTitle)?;
    let description = text_field(description).ok_or(ApiError::InvalidDescription)?;
    let completed = completed.as_bool().ok_or(ApiError::InvalidCompleted)?;
    let priority = match &payload.priority {
        Some(value) => priority_field(value)?,
        None => Priority::Medium,
    };

    let task = state.store.create(title, description, completed, priority).await;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /tasks/:id` - update any subset of a task's mutable fields.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    match state.store.update(id, |task| apply_update(task, &payload)).await {
        Some(result) => result.map(Json),
        None => Err(ApiError::NotFound),
    }
}

/// Validate and apply update fields one at a time, in the same order the
/// body lists them. A failure short-circuits with the field's error but
/// leaves fields applied earlier in the same request in place; existing
/// clients rely on the absence of rollback.
fn apply_update(task: &mut Task, payload: &TaskPayload) -> Result<Task, ApiError> {
    if let Some(value) = &payload.title {
        task.title = text_field(value).ok_or(ApiError::InvalidTitle)?;
    }
    if let Some(value) = &payload.description {
        task.description = text_field(value).ok_or(ApiError::InvalidDescription)?;
    }
    if let Some(value) = &payload.completed {
        task.completed = value.as_bool().ok_or(ApiError::InvalidCompleted)?;
    }
    if let Some(value) = &payload.priority {
        task.priority = priority_field(value)?;
    }
    Ok(task.clone())
}

/// `DELETE /tasks/:id` - remove a task permanently.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if state.store.remove(id).await {
        Ok(Json(serde_json::json!({ "message": "Task deleted successfully" })))
    } else {
        Err(ApiError::NotFound)
    }
}

/// `GET /tasks/priority/:level` - list tasks at one priority level.
pub async fn list_by_priority(
    State(state): State<Arc<AppState>>,
    Path(level): Path<String>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let level = Priority::parse(&level).ok_or(ApiError::InvalidPriorityLevel)?;
    let tasks = state
        .store
        .list()
        .await
        .into_iter()
        .filter(|t| t.priority == level)
        .collect();
    Ok(Json(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Write report".into(),
            description: "Quarterly numbers".into(),
            completed: false,
            priority: Priority::Medium,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_id_rejects_non_integers() {
        assert_eq!(parse_id("12"), Ok(12));
        assert_eq!(parse_id("abc"), Err(ApiError::InvalidId));
        assert_eq!(parse_id("12abc"), Err(ApiError::InvalidId));
        assert_eq!(parse_id("-1"), Err(ApiError::InvalidId));
    }

    #[test]
    fn test_text_field_trims_and_rejects_empties() {
        assert_eq!(text_field(&json!("  hello  ")), Some("hello".to_string()));
        assert_eq!(text_field(&json!("   ")), None);
        assert_eq!(text_field(&json!("")), None);
        assert_eq!(text_field(&json!(42)), None);
    }

    #[test]
    fn test_apply_update_changes_only_supplied_fields() {
        let mut task = sample_task();
        let payload = TaskPayload {
            completed: Some(json!(true)),
            ..Default::default()
        };
        let updated = apply_update(&mut task, &payload).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Write report");
        assert_eq!(updated.priority, Priority::Medium);
    }

    #[test]
    fn test_apply_update_keeps_earlier_fields_on_later_failure() {
        let mut task = sample_task();
        let payload = TaskPayload {
            title: Some(json!("New title")),
            completed: Some(json!("nope")),
            ..Default::default()
        };
        let result = apply_update(&mut task, &payload);
        assert_eq!(result, Err(ApiError::InvalidCompleted));
        // The title change applied before the completed field failed.
        assert_eq!(task.title, "New title");
    }

    #[test]
    fn test_apply_update_rejects_wrong_priority() {
        let mut task = sample_task();
        let payload = TaskPayload {
            priority: Some(json!("urgent")),
            ..Default::default()
        };
        assert_eq!(
            apply_update(&mut task, &payload),
            Err(ApiError::InvalidPriority)
        );
    }
}
