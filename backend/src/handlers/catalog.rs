//! HTTP handlers for the read-only product catalog

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{BomEntry, Material, Product};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;

/// List all products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.console.lock().await.products().to_vec())
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let console = state.console.lock().await;
    Ok(Json(console.product(product_id)?.clone()))
}

/// List all materials
pub async fn list_materials(State(state): State<AppState>) -> Json<Vec<Material>> {
    Json(state.console.lock().await.materials().to_vec())
}

/// Get a material by ID
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let console = state.console.lock().await;
    Ok(Json(console.material(material_id)?.clone()))
}

/// Full bill of materials
pub async fn list_bom(State(state): State<AppState>) -> Json<Vec<BomEntry>> {
    Json(state.console.lock().await.bom().to_vec())
}

/// Bill of materials for one product
pub async fn get_product_bom(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<BomEntry>>> {
    let console = state.console.lock().await;
    console.product(product_id)?;
    Ok(Json(console.catalog().bom_for(product_id).cloned().collect()))
}
