use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::extract::{JsonBody, TodoId};
use crate::api::AppState;
use crate::db::models::todo::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::error::{AppError, AppResult};
use crate::metrics::Op;

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Todo>>> {
    state.metrics.inc(Op::List);
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> AppResult<Json<Todo>> {
    state.metrics.inc(Op::Get);
    match state.store.get(id).await? {
        Some(todo) => Ok(Json(todo)),
        None => {
            state.metrics.inc_not_found();
            Err(AppError::NotFound(format!("Todo {}", id)))
        }
    }
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CreateTodoRequest>,
) -> AppResult<String> {
    state.metrics.inc(Op::Create);
    let id = state.store.create(&body).await?;
    tracing::info!("Created todo {}", id);
    Ok(format!("You create a new todo with {} ID", id))
}

/// Full-record overwrite. A missing id is not an error: the submitted
/// record is echoed back either way.
pub async fn update(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    JsonBody(body): JsonBody<UpdateTodoRequest>,
) -> AppResult<Json<Todo>> {
    state.metrics.inc(Op::Update);
    let matched = state.store.update(id, &body).await?;
    if matched == 0 {
        tracing::debug!("Update of todo {} matched no row", id);
    }
    Ok(Json(body.into_todo(id)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> AppResult<String> {
    state.metrics.inc(Op::Delete);
    let removed = state.store.delete(id).await?;
    if removed == 0 {
        tracing::debug!("Delete of todo {} matched no row", id);
    }
    Ok(format!("Successfully delete {} ID todos", id))
}
