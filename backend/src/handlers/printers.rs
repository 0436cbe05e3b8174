//! HTTP handlers for the printer registry and printer work queues

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{NewPrinter, Printer, PrinterUpdate};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct QueueOrderRequest {
    pub order_id: Uuid,
}

/// List all printers
pub async fn list_printers(State(state): State<AppState>) -> Json<Vec<Printer>> {
    Json(state.console.lock().await.printers().to_vec())
}

/// Register a printer
pub async fn create_printer(
    State(state): State<AppState>,
    Json(input): Json<NewPrinter>,
) -> AppResult<(StatusCode, Json<Printer>)> {
    let mut console = state.console.lock().await;
    let printer = console.add_printer(input)?;
    Ok((StatusCode::CREATED, Json(printer)))
}

/// Get a printer by ID
pub async fn get_printer(
    State(state): State<AppState>,
    Path(printer_id): Path<Uuid>,
) -> AppResult<Json<Printer>> {
    let console = state.console.lock().await;
    Ok(Json(console.printer(printer_id)?.clone()))
}

/// Update name, status or capabilities
pub async fn update_printer(
    State(state): State<AppState>,
    Path(printer_id): Path<Uuid>,
    Json(input): Json<PrinterUpdate>,
) -> AppResult<Json<Printer>> {
    let mut console = state.console.lock().await;
    let printer = console.update_printer(printer_id, input)?;
    Ok(Json(printer))
}

/// Queue an order on a printer
pub async fn assign_order(
    State(state): State<AppState>,
    Path(printer_id): Path<Uuid>,
    Json(input): Json<QueueOrderRequest>,
) -> AppResult<Json<Printer>> {
    let mut console = state.console.lock().await;
    let printer = console.assign_machine_to_order(printer_id, input.order_id)?;
    Ok(Json(printer))
}

/// Drop an order from a printer's queue
pub async fn remove_order(
    State(state): State<AppState>,
    Path((printer_id, order_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Printer>> {
    let mut console = state.console.lock().await;
    let printer = console.remove_machine_from_order(printer_id, order_id)?;
    Ok(Json(printer))
}
