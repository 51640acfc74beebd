//! HarvestHub - Crop Price Prediction Server
//!
//! Serves short-term crop price predictions for Indian mandi markets:
//! forecast extrapolation, season and demand inference, and regional price
//! adjustment.

use axum::{routing::get, Router};
use shared::{DemandPatterns, PredictionEngine, SeasonCalendar};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod extract;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use error::{AppError, AppResult};
use services::MarketService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<PredictionEngine>,
    pub market: MarketService,
}

impl AppState {
    /// Build the prediction engine and market source from configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let pricing = config
            .pricing_config()
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        let engine = PredictionEngine::new(
            pricing,
            SeasonCalendar::default(),
            DemandPatterns::standard(),
        );
        let market = MarketService::from_config(&config.market)?;

        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            market,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; HARVESTHUB_LOG_FORMAT=json switches to JSON lines
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "harvesthub_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("HARVESTHUB_LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = config::Config::load()?;

    tracing::info!("Starting HarvestHub Server");
    tracing::info!("Environment: {}", config.environment);

    let state = AppState::from_config(config)?;
    tracing::info!("Market source: {}", state.market.source_name());
    if !state.config.pricing.is_empty() {
        tracing::info!("Applied pricing overrides from configuration");
    }

    // Build application
    let app = create_app(state.clone());

    // Start server
    let ip: std::net::IpAddr = state.config.server.host.parse()?;
    let addr = SocketAddr::from((ip, state.config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "HarvestHub Crop Price Prediction API v1.0"
}
