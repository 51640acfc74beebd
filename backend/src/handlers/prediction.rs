//! HTTP handlers for price predictions

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use shared::{PredictionRequest, PredictionResult};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::services::PredictionService;
use crate::AppState;

fn service(state: &AppState) -> PredictionService {
    PredictionService::new(state.engine.clone(), state.market.clone())
}

/// Predict the price for a crop
pub async fn predict(
    State(state): State<AppState>,
    AppJson(request): AppJson<PredictionRequest>,
) -> AppResult<Json<PredictionResult>> {
    let prediction = service(&state).predict(&request).await?;
    Ok(Json(prediction.result))
}

/// Predict and render the plain-text report
pub async fn prediction_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<PredictionRequest>,
) -> AppResult<impl IntoResponse> {
    let report = service(&state).report(&request).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report))
}
