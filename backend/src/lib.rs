//! Print Shop Console - Backend Server
//!
//! HTTP API over a single in-memory production console: order intake,
//! procurement, production scheduling and shop-floor resource assignment.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::{Catalog, InventoryLedger, ProductionConsole, WorkflowResult};
use tokio::sync::Mutex;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::Config;

/// Application state shared across handlers
///
/// Every request locks the console for the whole command, so each
/// check-then-act sequence runs without interleaving.
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<Mutex<ProductionConsole>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(console: ProductionConsole, config: Config) -> Self {
        Self {
            console: Arc::new(Mutex::new(console)),
            config: Arc::new(config),
        }
    }

    /// State with a console built according to `config.store`
    pub fn from_config(config: Config) -> WorkflowResult<Self> {
        let console = if config.store.seed_demo_data {
            ProductionConsole::with_demo_data()?
        } else {
            ProductionConsole::new(Catalog::default(), InventoryLedger::default())
        };
        Ok(Self::new(console, config))
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Print Shop Console API v1"
}
