//! HTTP handlers for production schedules and the stage pipeline

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{ProductionSchedule, StageKind};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleProductionRequest {
    pub order_id: Uuid,
    pub machine_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: StageKind,
}

/// List all production schedules
pub async fn list_schedules(State(state): State<AppState>) -> Json<Vec<ProductionSchedule>> {
    Json(state.console.lock().await.schedules().to_vec())
}

/// Schedule a fulfillable order and reserve its materials
pub async fn schedule_production(
    State(state): State<AppState>,
    Json(input): Json<ScheduleProductionRequest>,
) -> AppResult<(StatusCode, Json<ProductionSchedule>)> {
    let mut console = state.console.lock().await;
    let schedule = console.schedule_production(input.order_id, input.machine_id)?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Get a schedule by ID
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> AppResult<Json<ProductionSchedule>> {
    let console = state.console.lock().await;
    Ok(Json(console.schedule(schedule_id)?.clone()))
}

pub async fn start_production(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> AppResult<Json<ProductionSchedule>> {
    let mut console = state.console.lock().await;
    let schedule = console.start_production(schedule_id)?;
    Ok(Json(schedule))
}

/// Move the pipeline to the requested stage
pub async fn update_stage(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
    Json(input): Json<UpdateStageRequest>,
) -> AppResult<Json<ProductionSchedule>> {
    let mut console = state.console.lock().await;
    let schedule = console.update_production_stage(schedule_id, input.stage)?;
    Ok(Json(schedule))
}

/// Finish production, consuming reserved materials
pub async fn complete_production(
    State(state): State<AppState>,
    Path(schedule_id): Path<Uuid>,
) -> AppResult<Json<ProductionSchedule>> {
    let mut console = state.console.lock().await;
    let schedule = console.complete_production(schedule_id)?;
    Ok(Json(schedule))
}
