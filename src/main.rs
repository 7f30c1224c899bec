//! Bookshelf Server - Book Catalog
//!
//! REST API server for a book catalog.

use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    schema,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    tracing::info!("Connecting to {}", config.database.redacted_url());
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_with(config.database.connect_options())
        .await?;

    tracing::info!("Connected to database");

    schema::sync(&pool).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create repository and services
    let repository = Repository::new(pool.clone());
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server is shutting down. Have a great day");

    Ok(())
}

/// Install the global subscriber for the configured output format
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookshelf_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format.to_lowercase().as_str() {
        "console" | "pretty" => registry.with(tracing_subscriber::fmt::layer()).init(),
        "json" => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stdout),
            )
            .init(),
        other => {
            registry
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
            tracing::warn!("Unknown logging format '{}', using text output", other);
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining requests");
}
