//! HTTP handlers for market data, forecasts and seasons

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{parse_commodity, Commodity, ExtrapolatedPoint, HistoricalSeries, MarketIntelligence, Season};

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CommodityList {
    pub commodities: Vec<Commodity>,
    pub count: usize,
}

/// List commodities with market data
pub async fn list_commodities(State(state): State<AppState>) -> Json<CommodityList> {
    let commodities = state.market.commodities();
    Json(CommodityList {
        count: commodities.len(),
        commodities,
    })
}

/// Get the market snapshot for a commodity
pub async fn get_market(
    State(state): State<AppState>,
    Path(commodity): Path<String>,
) -> AppResult<Json<MarketIntelligence>> {
    let commodity = parse_commodity(&commodity)?;
    let market = state.market.market(commodity, Utc::now().month()).await?;
    Ok(Json(market))
}

#[derive(Debug, Deserialize)]
pub struct ExtrapolateInput {
    pub prices: Vec<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ExtrapolateResponse {
    pub points: [ExtrapolatedPoint; 3],
}

/// Extrapolate a 7-day series to days 8-10
pub async fn extrapolate(AppJson(input): AppJson<ExtrapolateInput>) -> AppResult<Json<ExtrapolateResponse>> {
    let series = HistoricalSeries::new(&input.prices)?;
    let points = series.extrapolate()?;
    Ok(Json(ExtrapolateResponse { points }))
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub region: String,
    /// Defaults to the current month
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub region: String,
    pub month: u32,
    pub season: Season,
}

/// Infer the agricultural season for a region and month
pub async fn infer_season(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SeasonQuery>,
) -> AppResult<Json<SeasonResponse>> {
    let month = query.month.unwrap_or_else(|| Utc::now().month());
    let season = state.engine.infer_season(query.region.trim(), month)?;
    Ok(Json(SeasonResponse {
        region: query.region,
        month,
        season,
    }))
}
