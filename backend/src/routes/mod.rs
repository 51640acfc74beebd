//! Route definitions for the HarvestHub price prediction service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/commodities", commodity_routes())
        .route("/forecasts/extrapolate", post(handlers::extrapolate))
        .route("/seasons", get(handlers::infer_season))
        .nest("/predictions", prediction_routes())
}

/// Commodity and market snapshot routes
fn commodity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_commodities))
        .route("/:commodity/market", get(handlers::get_market))
}

/// Price prediction routes
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::predict))
        .route("/report", post(handlers::prediction_report))
}
