//! HTTP handlers for the worker registry and worker queues

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{NewWorker, Worker, WorkerUpdate};
use uuid::Uuid;

use super::printers::QueueOrderRequest;
use crate::error::AppResult;
use crate::AppState;

/// List all workers
pub async fn list_workers(State(state): State<AppState>) -> Json<Vec<Worker>> {
    Json(state.console.lock().await.workers().to_vec())
}

/// Register a worker
pub async fn create_worker(
    State(state): State<AppState>,
    Json(input): Json<NewWorker>,
) -> AppResult<(StatusCode, Json<Worker>)> {
    let mut console = state.console.lock().await;
    let worker = console.add_worker(input)?;
    Ok((StatusCode::CREATED, Json(worker)))
}

/// Get a worker by ID
pub async fn get_worker(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> AppResult<Json<Worker>> {
    let console = state.console.lock().await;
    Ok(Json(console.worker(worker_id)?.clone()))
}

pub async fn update_worker(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(input): Json<WorkerUpdate>,
) -> AppResult<Json<Worker>> {
    let mut console = state.console.lock().await;
    let worker = console.update_worker(worker_id, input)?;
    Ok(Json(worker))
}

/// Put a worker on an order
pub async fn assign_order(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(input): Json<QueueOrderRequest>,
) -> AppResult<Json<Worker>> {
    let mut console = state.console.lock().await;
    let worker = console.assign_worker_to_order(worker_id, input.order_id)?;
    Ok(Json(worker))
}

/// Take a worker off an order
pub async fn remove_order(
    State(state): State<AppState>,
    Path((worker_id, order_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Worker>> {
    let mut console = state.console.lock().await;
    let worker = console.remove_worker_from_order(worker_id, order_id)?;
    Ok(Json(worker))
}
