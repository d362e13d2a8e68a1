//! HTTP API Layer
//!
//! This crate provides the REST API for the agency's client book using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for clients, claim records, the expiry
//!   report, Drive export and session login
//! - **Middleware**: Request tracing, request ids, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Events**: Mutation events driving the background Drive export
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(config, clients, export, events)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod events;
pub mod export;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, delete},
    middleware as axum_middleware,
};
use chrono::NaiveDate;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{CoreError, Timezone};
use domain_client::ClientService;

use crate::config::ApiConfig;
use crate::events::EventPublisher;
use crate::export::ExportService;
use crate::handlers::{clients, drive, expiry, health, records, session};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub clients: ClientService,
    pub export: ExportService,
    pub events: EventPublisher,
    pub timezone: Timezone,
}

impl AppState {
    /// Creates the state, resolving the configured timezone
    pub fn new(
        config: ApiConfig,
        clients: ClientService,
        export: ExportService,
        events: EventPublisher,
    ) -> Result<Self, CoreError> {
        let timezone = config.timezone()?;
        Ok(Self {
            config: Arc::new(config),
            clients,
            export,
            events,
            timezone,
        })
    }

    /// Today's date on the agency's calendar
    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/auth/google", get(drive::google_auth))
        .route("/auth/google/callback", get(drive::google_callback));

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/:id/records", post(records::add_record));

    let drive_routes = Router::new()
        .route("/status", get(drive::drive_status))
        .route("/upload", post(drive::drive_upload));

    let api_routes = Router::new()
        .route("/login", post(session::login))
        .nest("/clients", client_routes)
        .route("/records/:id", delete(records::delete_record))
        .route("/insurance-expiry", get(expiry::insurance_expiry))
        .nest("/drive", drive_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
