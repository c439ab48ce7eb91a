//! # FitClub API
//!
//! HTTP surface of the booking engine. Booking writes go through the
//! [`BookingService`]; read-only listings go straight to the projection
//! repositories in `fitclub-db`.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths grouped per resource
//! - **Handlers**: request extraction and outcome mapping
//! - **Middleware**: error to response mapping
//! - **Config**: environment driven settings

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use eyre::{Result, WrapErr};
use fitclub_core::BookingService;
use fitclub_db::PgBookingStore;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state handed to every handler.
pub struct ApiState {
    /// Pool for the read-only projections
    pub db_pool: PgPool,
    /// Transactional booking operations
    pub bookings: BookingService,
}

/// Builds the router with every route group attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::classes::routes())
        .merge(routes::sessions::routes())
        .merge(routes::maintenance::routes())
        .merge(routes::trainers::routes())
        .merge(routes::members::routes())
        .merge(routes::payments::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server.
///
/// Installs the global tracing subscriber, wires the Postgres booking store
/// into a [`BookingService`] and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let bookings = BookingService::new(Arc::new(PgBookingStore::new(db_pool.clone())))
        .with_class_capacity(config.class_capacity);
    let state = Arc::new(ApiState { db_pool, bookings });

    let app = app(state);

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
