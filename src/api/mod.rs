//! HTTP API for the task service.
//!
//! ## Endpoints
//!
//! - `GET /tasks` - List tasks (`?completed=true`, `?sort=createdAt`)
//! - `GET /tasks/priority/{level}` - List tasks at a priority level
//! - `GET /tasks/{id}` - Get a task by id
//! - `POST /tasks` - Create a task
//! - `PUT /tasks/{id}` - Update a task
//! - `DELETE /tasks/{id}` - Delete a task

pub mod error;
mod routes;
pub mod tasks;

pub use error::ApiError;
pub use routes::{router, serve, AppState};
