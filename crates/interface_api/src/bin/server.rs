//! Agency Books - API Server Binary
//!
//! This binary starts the HTTP API server for the agency's client book.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin agency-api
//!
//! # Run with environment variables
//! API_PORT=8080 API_DATABASE_URL=sqlite://agency.db?mode=rwc cargo run --bin agency-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 5000)
//! * `API_DATABASE_URL` - SQLite connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_TIMEZONE` - IANA timezone for expiry countdowns (default: UTC)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_ADMIN_USERNAME` / `API_ADMIN_PASSWORD` - Login credentials
//! * `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_REDIRECT_URI` -
//!   Drive OAuth client (`API_DRIVE_*` take precedence)
//! * `API_UPLOAD_MAX_ATTEMPTS` / `API_UPLOAD_BACKOFF_MS` - Upload retry policy

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_client::ClientService;
use infra_db::{create_pool, DatabaseConfig, SqliteClientAdapter};
use infra_export::{
    CredentialStore, ExportUploader, FileCredentialStore, FileUploadLog, GoogleDriveClient,
    OAuthClient, UploadLog,
};
use interface_api::config::ApiConfig;
use interface_api::events::{spawn_export_worker, EventPublisher};
use interface_api::export::ExportService;
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, opens the database, wires the
/// Drive exporter, and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = %config.timezone,
        "Starting Agency Books API Server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("failed to open database")?;
    let clients = ClientService::new(Arc::new(SqliteClientAdapter::new(pool)));

    let export = build_export(&config, clients.clone());
    let (events, receiver) = EventPublisher::channel();
    let worker = spawn_export_worker(export.clone(), receiver);

    let state = AppState::new(config.clone(), clients, export, events)?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wires the credential store, audit log and Drive client
fn build_export(config: &ApiConfig, clients: ClientService) -> ExportService {
    let credentials: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(&config.drive_token_path));
    let log: Arc<dyn UploadLog> = Arc::new(FileUploadLog::new(&config.drive_log_path));

    let oauth = config.oauth_config().map(OAuthClient::new);
    if oauth.is_none() {
        tracing::warn!("Google OAuth client not configured; Drive export disabled");
    }

    let uploader = oauth.clone().map(|oauth| {
        ExportUploader::new(
            Arc::new(GoogleDriveClient::new(oauth)),
            credentials.clone(),
            log,
            config.retry_policy(),
        )
    });

    ExportService::new(clients, credentials, uploader, oauth)
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
