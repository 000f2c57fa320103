//! Glimpse Server — moment-window push-notification dispatcher
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use glimpse_core::config::AppConfig;
use glimpse_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GLIMPSE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Glimpse v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = glimpse_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    glimpse_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize repositories ──────────────────────────
    let schedule_repo = Arc::new(glimpse_database::repositories::ScheduleRepository::new(
        db_pool.clone(),
    ));
    let device_repo = Arc::new(glimpse_database::repositories::DeviceRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Initialize push gateway client ───────────────────
    tracing::info!("Initializing push gateway client...");
    let gateway = Arc::new(glimpse_push::http::HttpPushGateway::new(&config.push)?);

    // ── Step 4: Initialize dispatcher ────────────────────────────
    let dispatcher = Arc::new(glimpse_dispatch::MomentWindowDispatcher::new(
        Arc::clone(&schedule_repo) as Arc<dyn glimpse_dispatch::store::ScheduleStore>,
        Arc::clone(&device_repo) as Arc<dyn glimpse_dispatch::store::DeviceStore>,
        gateway,
        config.dispatch.clone(),
    ));

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 6: Start interval runner (optional) ─────────────────
    let runner_handle = if config.dispatch.poll_enabled {
        tracing::info!("Starting interval dispatch runner...");

        let runner = glimpse_dispatch::DispatchRunner::new(
            Arc::clone(&dispatcher),
            config.dispatch.clone(),
        );

        let runner_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            runner.run(runner_cancel).await;
        });

        tracing::info!("Interval dispatch runner started");
        Some(handle)
    } else {
        tracing::info!("Interval dispatch runner disabled; external trigger expected");
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    tracing::info!(
        "Starting HTTP server on {}:{}...",
        config.server.host,
        config.server.port
    );

    let app_state = glimpse_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        dispatcher: Arc::clone(&dispatcher),
        schedule_repo: Arc::clone(&schedule_repo),
    };

    let app = glimpse_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Glimpse server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 9: Wait for background tasks ────────────────────────
    if let Some(handle) = runner_handle {
        tracing::info!("Waiting for dispatch runner to complete...");
        let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
        let _ = tokio::time::timeout(grace, handle).await;
    }

    tracing::info!("Glimpse server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
