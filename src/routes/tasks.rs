// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task list routes.
//!
//! The whole collection lives under one store key as a versioned JSON
//! envelope; adding is a read-append-write retried on version conflicts,
//! so concurrent adds never overwrite each other.

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::task::Task;
use crate::AppState;

const MAX_WRITE_ATTEMPTS: u32 = 5;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks", get(list_tasks).post(add_task))
}

/// List all tasks in insertion order.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>> {
    let list = state.db.load_tasks().await?;
    Ok(Json(list.tasks))
}

#[derive(Deserialize)]
pub struct AddTaskRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Append a task to the shared list.
async fn add_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddTaskRequest>,
) -> Result<Json<Task>> {
    let title = match body.title {
        Some(title) if !title.is_empty() => title,
        _ => return Err(AppError::MissingTitle),
    };

    let task = Task::new(title, body.description.filter(|d| !d.is_empty()));

    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let list = state.db.load_tasks().await?;
        let mut tasks = list.tasks;
        tasks.push(task.clone());

        if state.db.store_tasks(&tasks, list.version).await? {
            tracing::debug!(task_id = %task.id, attempt, "Task added");
            return Ok(Json(task));
        }

        tracing::debug!(attempt, "Task list version conflict, retrying");
    }

    Err(AppError::WriteContention)
}
