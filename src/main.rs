//! reqlog server: a small axum service wired with the request logger.
//!
//! Main entry point: loads configuration, installs the log subscriber,
//! builds the router and serves it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use reqlog_core::AppError;
use reqlog_core::config::AppConfig;
use reqlog_middleware::{HandlerError, RequestLogger, TracingSink, init_subscriber};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_subscriber(&config.request_log) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("REQLOG_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    AppConfig::load(&config_path)
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting reqlog v{}", env!("CARGO_PKG_VERSION"));

    let sink = TracingSink::new(config.request_log.profile);
    let logger = RequestLogger::new(&config.request_log, Arc::new(sink))?;

    let app = build_app(&logger, Duration::from_secs(config.server.request_timeout_seconds));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Routes plus middleware. The timeout layer sits inside the logger so
/// timed out requests are logged with their 408.
fn build_app(logger: &RequestLogger, timeout: Duration) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/users/{id}", get(get_user))
        .route("/orders/{id}", get(get_order).post(create_order))
        .route("/crash", get(crash))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));
    logger.install(router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[derive(Debug, Serialize)]
struct User {
    id: u64,
}

async fn get_user(Path(id): Path<u64>) -> Json<User> {
    Json(User { id })
}

async fn get_order(Path(id): Path<u64>) -> Result<StatusCode, HandlerError> {
    Err(AppError::not_found(format!("Order {id} not found")).into())
}

async fn create_order(Path(id): Path<u64>) -> Result<StatusCode, HandlerError> {
    if id == 0 {
        return Err(AppError::validation("Order id must be positive").into());
    }
    Ok(StatusCode::CREATED)
}

async fn crash() -> Result<(), HandlerError> {
    Err(AppError::internal("db timeout").into())
}
