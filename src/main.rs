//! Equipment Tracker Server
//!
//! REST API server for equipment inventory and checkout tracking.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use equipment_tracker::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Equipment Tracker v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid server host/port")?;

    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());
    services.users.ensure_admin().await?;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global subscriber: stdout (pretty or json) plus an optional daily log file
fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equipment_tracker={},tower_http=debug", config.level).into()
    });

    let stdout_layer = match config.format.as_str() {
        "json" => fmt::layer().json().boxed(),
        _ => fmt::layer().boxed(),
    };

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "equipment-tracker.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Users
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route(
            "/users/:id",
            get(api::users::get_user).delete(api::users::delete_user),
        )
        // Categories
        .route(
            "/categories",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .route(
            "/categories/:id",
            get(api::categories::get_category)
                .put(api::categories::update_category)
                .patch(api::categories::update_category)
                .delete(api::categories::delete_category),
        )
        // Locations
        .route(
            "/locations",
            get(api::locations::list_locations).post(api::locations::create_location),
        )
        .route(
            "/locations/:id",
            get(api::locations::get_location)
                .put(api::locations::update_location)
                .patch(api::locations::update_location)
                .delete(api::locations::delete_location),
        )
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route("/equipment/summary", get(api::equipment::list_equipment_summary))
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .put(api::equipment::update_equipment)
                .patch(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        // Checkout logs
        .route(
            "/equipment-logs",
            get(api::equipment_logs::list_logs).post(api::equipment_logs::create_log),
        )
        .route(
            "/equipment-logs/:id",
            get(api::equipment_logs::get_log)
                .put(api::equipment_logs::update_log)
                .patch(api::equipment_logs::update_log)
                .delete(api::equipment_logs::delete_log),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
