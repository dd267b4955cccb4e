//! Task model and in-memory storage.
//!
//! The store holds an ordered list of tasks plus a monotonically
//! increasing id counter behind a single `RwLock`. It can be seeded from
//! a JSON file (`{ "tasks": [...] }`) at startup; a missing or
//! unparseable file is an expected condition and results in an empty
//! store.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Task severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a priority from its wire name. Returns `None` for anything
    /// outside the three known levels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A single to-do item.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// A task record as it appears in the seed file. `priority` and
/// `createdAt` are optional and normalized on load.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedTask {
    id: u64,
    title: String,
    description: String,
    completed: bool,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

/// Seed file layout: `{ "tasks": [...] }`.
#[derive(Debug, Deserialize)]
struct SeedFile {
    tasks: Vec<SeedTask>,
}

#[derive(Debug, Default)]
struct StoreInner {
    tasks: Vec<Task>,
    next_id: u64,
}

/// In-memory task storage shared by all request handlers.
#[derive(Debug, Clone)]
pub struct TaskStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                tasks: Vec::new(),
                next_id: 1,
            })),
        }
    }
}

impl TaskStore {
    /// Create a store seeded from the JSON file at `path`.
    ///
    /// Missing `priority` fields default to medium and missing
    /// `createdAt` fields to the current time. The id counter continues
    /// from one past the highest seeded id. If the file is absent or
    /// cannot be parsed, the store starts empty; this is logged but not
    /// an error.
    pub fn load(path: &Path) -> Self {
        let tasks = match Self::read_seed(path) {
            Ok(tasks) => {
                tracing::info!("Loaded {} tasks from {}", tasks.len(), path.display());
                tasks
            }
            Err(e) => {
                tracing::info!(
                    "No usable seed file at {} ({}), starting with an empty task list",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(StoreInner { tasks, next_id })),
        }
    }

    fn read_seed(path: &Path) -> anyhow::Result<Vec<Task>> {
        let contents = std::fs::read_to_string(path)?;
        let seed: SeedFile = serde_json::from_str(&contents)?;
        let now = Utc::now();
        let tasks = seed
            .tasks
            .into_iter()
            .map(|record| Task {
                id: record.id,
                title: record.title,
                description: record.description,
                completed: record.completed,
                priority: record.priority.unwrap_or_default(),
                created_at: record.created_at.unwrap_or(now),
            })
            .collect();
        Ok(tasks)
    }

    /// Return a copy of all tasks in insertion order.
    pub async fn list(&self) -> Vec<Task> {
        self.inner.read().await.tasks.clone()
    }

    /// Find a task by id.
    pub async fn find(&self, id: u64) -> Option<Task> {
        let inner = self.inner.read().await;
        inner.tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Append a new task, assigning it the next id and the current
    /// timestamp.
    pub async fn create(
        &self,
        title: String,
        description: String,
        completed: bool,
        priority: Priority,
    ) -> Task {
        let mut inner = self.inner.write().await;
        let task = Task {
            id: inner.next_id,
            title,
            description,
            completed,
            priority,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        task
    }

    /// Run `apply` against the task with the given id, mutating it in
    /// place. Returns `None` if no such task exists, otherwise the
    /// closure's result.
    pub async fn update<T>(&self, id: u64, apply: impl FnOnce(&mut Task) -> T) -> Option<T> {
        let mut inner = self.inner.write().await;
        inner.tasks.iter_mut().find(|t| t.id == id).map(apply)
    }

    /// Remove the task with the given id. Returns whether a task was
    /// removed.
    pub async fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                inner.tasks.remove(index);
                true
            }
            None => false,
        }
    }
}
