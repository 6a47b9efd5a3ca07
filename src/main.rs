//! AquaGuard Backend Server
//!
//! Water-borne disease monitoring API for Northeast India.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AQUAGUARD API                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌──────────────────────┐ │
//! │  │  API      │  │  Prediction  │  │  Mock Sensor Store   │ │
//! │  │  Gateway  │  │  Service     │  │  (readings/metrics)  │ │
//! │  │  (Axum)   │  │  (ONNX+rule) │  │                      │ │
//! │  └─────┬─────┘  └──────┬───────┘  └──────────┬───────────┘ │
//! │        └───────────────┼─────────────────────┘              │
//! │                        ▼                                    │
//! │                 ┌─────────────┐                            │
//! │                 │ Risk Scorer │                            │
//! │                 └─────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod ml;
mod mock;
mod models;
mod risk;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "aquaguard_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("AquaGuard API starting...");
    tracing::info!("Model path: {}", config.model_path);

    // Build the prediction service once; model load failure is non-fatal
    let predictor = Arc::new(ml::PredictionService::from_config(&config));
    if predictor.is_model_loaded() {
        tracing::info!("Classifier model loaded");
    } else {
        tracing::warn!("No classifier model, running rule-based fallback only");
    }

    // Build application state
    let state = AppState {
        config: config.clone(),
        predictor,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub predictor: Arc<ml::PredictionService>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))

        // Predictions
        .route("/api/predict/outbreak-risk", post(handlers::predictions::predict))
        .route("/api/model/status", get(handlers::predictions::model_status))

        // Water quality readings
        .route("/api/water-quality/readings", get(handlers::readings::list))
        .route("/api/water-quality/readings/:id", get(handlers::readings::get))
        .route("/api/water-quality/metrics", get(handlers::readings::metrics))
        .route("/api/water-quality/districts", get(handlers::readings::districts))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
