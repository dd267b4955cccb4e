//! HTTP route table and server startup.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::task::TaskStore;

use super::tasks;

/// Shared application state.
pub struct AppState {
    /// The in-memory task store
    pub store: TaskStore,
}

/// Build the router. Routing is a pure dispatch table; all logic lives
/// in the handlers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        // Registered next to /tasks/:id; axum prefers the literal
        // `priority` segment over the capture.
        .route("/tasks/priority/:level", get(tasks::list_by_priority))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = TaskStore::load(&config.seed_path);
    let state = Arc::new(AppState { store });
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
