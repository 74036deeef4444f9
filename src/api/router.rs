use axum::{routing::get, Router};
use std::sync::Arc;
use super::AppState;
use super::handlers;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        // Operational (not part of the todo resource)
        .route("/health", get(handlers::index::health_check))
        .route("/metrics", get(handlers::metrics::prometheus_metrics))
        // Todos
        .route("/todos", get(handlers::todos::list).post(handlers::todos::create))
        .route(
            "/todos/{id}",
            get(handlers::todos::get)
                .put(handlers::todos::update)
                .delete(handlers::todos::delete),
        )
        .with_state(state)
}
