//! HTTP handlers for order intake, review and fulfillment

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{
    FulfillmentReport, MachineAssignment, NewOrder, Order, OrderCommercials, ProcessStatus,
    ProductionSchedule, ProductionStage, PurchaseRequest,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcessStatusRequest {
    pub process_status: ProcessStatus,
}

/// Everything the console knows about one order
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub schedule: Option<ProductionSchedule>,
    pub assignment: Option<MachineAssignment>,
    pub purchase_requests: Vec<PurchaseRequest>,
}

/// List all orders
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.console.lock().await.orders().to_vec())
}

/// Take in a new order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<NewOrder>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let mut console = state.console.lock().await;
    let order = console.create_order(input)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order with its schedule, assignment and purchase requests
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<OrderDetail>> {
    let console = state.console.lock().await;
    let order = console.order(order_id)?.clone();
    Ok(Json(OrderDetail {
        order,
        schedule: console.schedule_for_order(order_id).cloned(),
        assignment: console.assignment_for_order(order_id).cloned(),
        purchase_requests: console
            .purchase_requests_for_order(order_id)
            .into_iter()
            .cloned()
            .collect(),
    }))
}

/// Run a fulfillment check against current stock
pub async fn check_fulfillment(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<FulfillmentReport>> {
    let mut console = state.console.lock().await;
    let report = console.check_fulfillment(order_id)?;
    Ok(Json(report))
}

/// Advance consultant / manager review
pub async fn update_process_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<ProcessStatusRequest>,
) -> AppResult<Json<Order>> {
    let mut console = state.console.lock().await;
    let order = console.update_process_status(order_id, input.process_status)?;
    Ok(Json(order))
}

/// Replace the order's commercial terms
pub async fn update_commercials(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<OrderCommercials>,
) -> AppResult<Json<Order>> {
    let mut console = state.console.lock().await;
    let order = console.update_order_commercials(order_id, input)?;
    Ok(Json(order))
}

/// Raise purchase requests for the order's recorded shortages
pub async fn create_purchase_requests(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<Vec<PurchaseRequest>>)> {
    let mut console = state.console.lock().await;
    let requests = console.create_purchase_request(order_id)?;
    Ok((StatusCode::CREATED, Json(requests)))
}

/// Purchase requests raised for an order
pub async fn list_order_purchase_requests(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<PurchaseRequest>>> {
    let console = state.console.lock().await;
    console.order(order_id)?;
    Ok(Json(
        console
            .purchase_requests_for_order(order_id)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

/// Pipeline stages of the order's schedule
pub async fn get_order_stages(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductionStage>>> {
    let console = state.console.lock().await;
    Ok(Json(console.stages_for_order(order_id)?.to_vec()))
}

/// The order's production schedule
pub async fn get_order_schedule(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ProductionSchedule>> {
    let console = state.console.lock().await;
    console.order(order_id)?;
    console
        .schedule_for_order(order_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Production schedule for order {}", order_id)))
}
