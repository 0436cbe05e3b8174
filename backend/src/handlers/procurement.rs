//! HTTP handlers for purchase requests, purchase orders and goods receipt

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{PurchaseOrder, PurchaseRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseOrderRequest {
    pub purchase_request_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub supplier: String,
    pub expected_delivery: NaiveDate,
}

/// List all purchase requests
pub async fn list_purchase_requests(State(state): State<AppState>) -> Json<Vec<PurchaseRequest>> {
    Json(state.console.lock().await.purchase_requests().to_vec())
}

/// Get a purchase request by ID
pub async fn get_purchase_request(
    State(state): State<AppState>,
    Path(pr_id): Path<Uuid>,
) -> AppResult<Json<PurchaseRequest>> {
    let console = state.console.lock().await;
    Ok(Json(console.purchase_request(pr_id)?.clone()))
}

/// Withdraw a pending purchase request
pub async fn cancel_purchase_request(
    State(state): State<AppState>,
    Path(pr_id): Path<Uuid>,
) -> AppResult<Json<PurchaseRequest>> {
    let mut console = state.console.lock().await;
    let pr = console.cancel_purchase_request(pr_id)?;
    Ok(Json(pr))
}

/// List all purchase orders
pub async fn list_purchase_orders(State(state): State<AppState>) -> Json<Vec<PurchaseOrder>> {
    Json(state.console.lock().await.purchase_orders().to_vec())
}

/// Place a purchase order against a pending request
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderRequest>,
) -> AppResult<(StatusCode, Json<PurchaseOrder>)> {
    input.validate()?;

    let mut console = state.console.lock().await;
    let po = console.create_purchase_order(
        input.purchase_request_id,
        &input.supplier,
        input.expected_delivery,
    )?;
    Ok((StatusCode::CREATED, Json(po)))
}

/// Get a purchase order by ID
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(po_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let console = state.console.lock().await;
    Ok(Json(console.purchase_order(po_id)?.clone()))
}

/// Book a delivered purchase order into stock
pub async fn receive_purchase_order(
    State(state): State<AppState>,
    Path(po_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let mut console = state.console.lock().await;
    let po = console.receive_inventory(po_id)?;
    Ok(Json(po))
}
