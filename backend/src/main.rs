//! Print Shop Console - Backend Server binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use psc_server::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "psc_server=debug,shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Print Shop Console Server");
    tracing::info!("Environment: {}", config.environment);

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;
    {
        let console = state.console.lock().await;
        tracing::info!(
            products = console.products().len(),
            printers = console.printers().len(),
            workers = console.workers().len(),
            "console ready"
        );
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
