//! # taskserve
//!
//! Minimal task tracking over a JSON REST API. All task records live in
//! process memory for the lifetime of the server, optionally seeded from
//! a JSON file at startup; a restart always returns to the seed state.
//!
//! ## Modules
//! - `api`: HTTP routes and request handlers
//! - `task`: the task model and in-memory store
//! - `config`: environment-driven server configuration

pub mod api;
pub mod config;
pub mod task;

pub use config::Config;
pub use task::{Priority, Task, TaskStore};
