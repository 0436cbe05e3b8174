//! HTTP handlers for machine assignments and worker reassignment

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{AssignmentStatus, MachineAssignment};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub order_id: Uuid,
    pub machine_id: Uuid,
    pub worker_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentStatusRequest {
    pub status: AssignmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct ReassignWorkerRequest {
    pub worker_id: Uuid,
}

/// List all machine assignments
pub async fn list_assignments(State(state): State<AppState>) -> Json<Vec<MachineAssignment>> {
    Json(state.console.lock().await.assignments().to_vec())
}

/// Put a machine, and optionally a worker, on an order
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(input): Json<CreateAssignmentRequest>,
) -> AppResult<(StatusCode, Json<MachineAssignment>)> {
    let mut console = state.console.lock().await;
    let assignment =
        console.assign_machine_with_worker(input.order_id, input.machine_id, input.worker_id)?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Get an assignment by ID
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
) -> AppResult<Json<MachineAssignment>> {
    let console = state.console.lock().await;
    Ok(Json(console.assignment(assignment_id)?.clone()))
}

pub async fn update_assignment_status(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
    Json(input): Json<AssignmentStatusRequest>,
) -> AppResult<Json<MachineAssignment>> {
    let mut console = state.console.lock().await;
    let assignment = console.update_assignment_status(assignment_id, input.status)?;
    Ok(Json(assignment))
}

/// Hand an order's assignment to a different worker
pub async fn reassign_worker(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<ReassignWorkerRequest>,
) -> AppResult<Json<MachineAssignment>> {
    let mut console = state.console.lock().await;
    let assignment = console.reassign_worker(order_id, input.worker_id)?;
    Ok(Json(assignment))
}
