//! HTTP handlers for inventory positions and stock takes

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{InventoryPosition, InventoryRecord};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

/// Physical count from a stock take
#[derive(Debug, Deserialize)]
pub struct AdjustInventoryRequest {
    pub on_hand: Decimal,
}

/// Inventory joined with material names
pub async fn list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryPosition>> {
    Json(state.console.lock().await.inventory_positions())
}

/// Stock record for one material
pub async fn get_inventory_record(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<InventoryRecord>> {
    let console = state.console.lock().await;
    Ok(Json(console.inventory_record(material_id)?.clone()))
}

/// Overwrite the on-hand count of a material
pub async fn adjust_inventory(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
    Json(input): Json<AdjustInventoryRequest>,
) -> AppResult<Json<InventoryRecord>> {
    let mut console = state.console.lock().await;
    let record = console.adjust_inventory(material_id, input.on_hand)?;
    Ok(Json(record))
}
