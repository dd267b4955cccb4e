//! API error taxonomy.
//!
//! Every error here is a client error surfaced synchronously as 400 or
//! 404 with a `{ "error": "<message>" }` body; none crash the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Path id segment is not an integer.
    #[error("Invalid task ID")]
    InvalidId,
    /// No task with the given id.
    #[error("Task not found")]
    NotFound,
    /// Create request without one of the required fields.
    #[error("Missing required fields: title, description, completed")]
    MissingFields,
    #[error("Title must be a non-empty string")]
    InvalidTitle,
    #[error("Description must be a non-empty string")]
    InvalidDescription,
    #[error("Completed must be a boolean value")]
    InvalidCompleted,
    /// Body priority outside {low, medium, high}.
    #[error("Priority must be one of: low, medium, high")]
    InvalidPriority,
    /// Path `:level` segment outside {low, medium, high}.
    #[error("Priority level must be one of: low, medium, high")]
    InvalidPriorityLevel,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
