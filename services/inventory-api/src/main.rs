// /apotek-inventory/services/inventory-api/src/main.rs

mod api;
mod core;
mod middleware;
mod models;
mod repository;
mod utils;

use axum::{middleware as axum_middleware, Router};
use sqlx::postgres::PgPoolOptions;
use std::{env, net::SocketAddr, sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    api::routes,
    core::{jwt::JwtService, security::SecurityService},
    middleware::auth::auth_middleware,
    repository::Repository,
    utils::scheduler::start_background_jobs,
};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<Repository>,
    pub jwt_service: Arc<JwtService>,
    pub security_service: Arc<SecurityService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    utils::logger::init_logger();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup database connection pool
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL harus di-set di environment");

    let pool = PgPoolOptions::new()
        .max_connections(
            env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10)
        )
        .acquire_timeout(Duration::from_secs(
            env::var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3)
        ))
        .connect(&database_url)
        .await?;

    // Test database connection
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .expect("Gagal ping database");

    info!("Database berhasil terkoneksi");

    // Jalankan migrasi skema
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repository layer
    let repository = Arc::new(Repository::new(pool.clone()));

    // Initialize auth services
    let jwt_service = Arc::new(JwtService::new()?);
    let security_service = Arc::new(SecurityService::new());

    // Start background jobs
    start_background_jobs(repository.clone()).await?;

    // Create application state
    let app_state = AppState {
        repository,
        jwt_service,
        security_service,
    };

    // Setup CORS
    let cors = utils::cors::create_cors_layer();

    // Build application dengan middleware stack
    let app = Router::new()
        // Mount API routes
        .merge(routes::create_routes())
        // Health check endpoint
        .route("/api/health", axum::routing::get(health_check))
        .with_state(app_state.clone())
        // Auth middleware paling dalam: CORS preflight tidak perlu token
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                // Request tracing (paling luar)
                .layer(TraceLayer::new_for_http())
                // Timeout protection
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                // CORS handling
                .layer(cors),
        );

    // Server configuration
    let port = env::var("SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Inventory API berjalan di {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| e.into())
}

// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment": env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    }))
}
