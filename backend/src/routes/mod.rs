//! Route definitions for the Print Shop Console API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .nest("/materials", material_routes())
        .route("/bom", get(handlers::catalog::list_bom))
        .nest("/inventory", inventory_routes())
        .nest("/orders", order_routes())
        .nest("/purchase-requests", purchase_request_routes())
        .nest("/purchase-orders", purchase_order_routes())
        .nest("/schedules", schedule_routes())
        .nest("/printers", printer_routes())
        .nest("/workers", worker_routes())
        .nest("/assignments", assignment_routes())
}

/// Catalog routes (read-only)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::list_products))
        .route("/:product_id", get(handlers::catalog::get_product))
        .route("/:product_id/bom", get(handlers::catalog::get_product_bom))
}

fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::list_materials))
        .route("/:material_id", get(handlers::catalog::get_material))
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::inventory::list_inventory))
        .route(
            "/:material_id",
            get(handlers::inventory::get_inventory_record).put(handlers::inventory::adjust_inventory),
        )
}

/// Order intake, review and fulfillment routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/:order_id", get(handlers::orders::get_order))
        .route(
            "/:order_id/fulfillment-check",
            post(handlers::orders::check_fulfillment),
        )
        .route(
            "/:order_id/process-status",
            put(handlers::orders::update_process_status),
        )
        .route(
            "/:order_id/commercials",
            put(handlers::orders::update_commercials),
        )
        .route(
            "/:order_id/purchase-requests",
            get(handlers::orders::list_order_purchase_requests)
                .post(handlers::orders::create_purchase_requests),
        )
        .route("/:order_id/schedule", get(handlers::orders::get_order_schedule))
        .route("/:order_id/stages", get(handlers::orders::get_order_stages))
        .route("/:order_id/worker", put(handlers::assignments::reassign_worker))
}

/// Procurement routes
fn purchase_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::procurement::list_purchase_requests))
        .route("/:pr_id", get(handlers::procurement::get_purchase_request))
        .route(
            "/:pr_id/cancel",
            post(handlers::procurement::cancel_purchase_request),
        )
}

fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::procurement::list_purchase_orders)
                .post(handlers::procurement::create_purchase_order),
        )
        .route("/:po_id", get(handlers::procurement::get_purchase_order))
        .route(
            "/:po_id/receive",
            post(handlers::procurement::receive_purchase_order),
        )
}

/// Production schedule routes
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::production::list_schedules).post(handlers::production::schedule_production),
        )
        .route("/:schedule_id", get(handlers::production::get_schedule))
        .route("/:schedule_id/start", post(handlers::production::start_production))
        .route("/:schedule_id/stage", put(handlers::production::update_stage))
        .route(
            "/:schedule_id/complete",
            post(handlers::production::complete_production),
        )
}

/// Printer registry routes
fn printer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::printers::list_printers).post(handlers::printers::create_printer),
        )
        .route(
            "/:printer_id",
            get(handlers::printers::get_printer).put(handlers::printers::update_printer),
        )
        .route("/:printer_id/orders", post(handlers::printers::assign_order))
        .route(
            "/:printer_id/orders/:order_id",
            delete(handlers::printers::remove_order),
        )
}

/// Worker registry routes
fn worker_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::workers::list_workers).post(handlers::workers::create_worker),
        )
        .route(
            "/:worker_id",
            get(handlers::workers::get_worker).put(handlers::workers::update_worker),
        )
        .route("/:worker_id/orders", post(handlers::workers::assign_order))
        .route(
            "/:worker_id/orders/:order_id",
            delete(handlers::workers::remove_order),
        )
}

/// Machine assignment routes
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::assignments::list_assignments)
                .post(handlers::assignments::create_assignment),
        )
        .route("/:assignment_id", get(handlers::assignments::get_assignment))
        .route(
            "/:assignment_id/status",
            put(handlers::assignments::update_assignment_status),
        )
}
