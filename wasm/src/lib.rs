//! WebAssembly module for the HarvestHub price predictor
//!
//! Provides client-side computation for:
//! - Forecast extrapolation to days 8-10
//! - Season inference and yield assessment
//! - Price composition and full predictions against the built-in market data
//! - Plain-text prediction reports

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{
    assess_yield_quality as assess_quality, decimal_from_f64, decimal_to_f64, Commodity,
    CoreResult, DemandLevel, HistoricalSeries, MarketCatalog, MarketIntelligence,
    PredictionEngine, PredictionError, PredictionRequest, PriceFactors, Season,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("HarvestHub predictor loaded"));
}

/// Convert a core error into a JS exception, logging it to the console
fn to_js_error(err: PredictionError) -> JsValue {
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> CoreResult<T> {
    serde_json::from_str(json).map_err(|e| PredictionError::invalid(format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> CoreResult<String> {
    serde_json::to_string(value).map_err(|e| PredictionError::invalid(e.to_string()))
}

/// Current month (1-12) from the browser clock
fn browser_month() -> u32 {
    js_sys::Date::new_0().get_month() + 1
}

/// Current time from the browser clock
fn browser_now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Predictor over the built-in market data and canonical tables
#[wasm_bindgen]
pub struct PricePredictor {
    engine: PredictionEngine,
    catalog: MarketCatalog,
}

impl Default for PricePredictor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PricePredictor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PricePredictor {
        PricePredictor {
            engine: PredictionEngine::standard(),
            catalog: MarketCatalog::builtin(),
        }
    }

    /// Supported commodity names as a JSON array
    pub fn commodities(&self) -> String {
        let names: Vec<&str> = self.catalog.commodities().iter().map(|c| c.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Built-in market snapshot for a commodity as JSON
    pub fn market(&self, commodity: &str) -> Result<String, JsValue> {
        self.market_json(commodity).map_err(to_js_error)
    }

    /// Run a prediction for a JSON `PredictionRequest`; returns the result JSON
    pub fn predict(&self, request_json: &str) -> Result<String, JsValue> {
        self.predict_json(request_json, browser_month())
            .map_err(to_js_error)
    }

    /// Extrapolate the forecast of a JSON market snapshot to days 8-10
    pub fn extrapolate(&self, market_json: &str) -> Result<String, JsValue> {
        self.extrapolate_json(market_json).map_err(to_js_error)
    }

    /// Compose a price from a base price and optional factors
    #[allow(clippy::too_many_arguments)]
    pub fn compose_price(
        &self,
        base_price: f64,
        region: Option<String>,
        season: Option<String>,
        demand: Option<String>,
        yield_per_hectare: Option<f64>,
        soil: Option<String>,
        irrigation: Option<String>,
    ) -> Result<f64, JsValue> {
        let factors = build_factors(region, season, demand, yield_per_hectare, soil, irrigation)
            .map_err(to_js_error)?;
        self.compose(base_price, &factors).map_err(to_js_error)
    }

    /// Plain-text report for a JSON `PredictionRequest`
    pub fn report(&self, request_json: &str) -> Result<String, JsValue> {
        self.report_text(request_json, browser_month(), browser_now())
            .map_err(to_js_error)
    }

    /// Share text for a JSON `PredictionRequest`
    pub fn share_message(&self, request_json: &str) -> Result<String, JsValue> {
        self.share_text(request_json, browser_month())
            .map_err(to_js_error)
    }

    /// Download file name for a report generated today
    pub fn report_file_name(&self, commodity: &str, region: &str) -> Result<String, JsValue> {
        let commodity: Commodity = commodity.parse().map_err(to_js_error)?;
        let today: NaiveDate = browser_now().date_naive();
        Ok(shared::report_file_name(commodity, region, today))
    }
}

impl PricePredictor {
    fn market_for(&self, commodity: &str) -> CoreResult<&MarketIntelligence> {
        let commodity: Commodity = commodity.parse()?;
        self.catalog
            .get(commodity)
            .ok_or_else(|| PredictionError::UnknownCommodity(commodity.to_string()))
    }

    fn market_json(&self, commodity: &str) -> CoreResult<String> {
        to_json(self.market_for(commodity)?)
    }

    fn predict_json(&self, request_json: &str, month: u32) -> CoreResult<String> {
        let request: PredictionRequest = parse_json(request_json, "request")?;
        let market = self.market_for(&request.commodity)?;
        let result = self.engine.predict(&request, market, month)?;
        to_json(&result)
    }

    fn share_text(&self, request_json: &str, month: u32) -> CoreResult<String> {
        let request: PredictionRequest = parse_json(request_json, "request")?;
        let market = self.market_for(&request.commodity)?;
        let result = self.engine.predict(&request, market, month)?;
        Ok(shared::share_message(&result))
    }

    fn extrapolate_json(&self, market_json: &str) -> CoreResult<String> {
        let market: MarketIntelligence = parse_json(market_json, "market")?;
        let points = market.forecast_7_days.series().extrapolate()?;
        to_json(&shared::NextThreeDays::from(points))
    }

    fn compose(&self, base_price: f64, factors: &PriceFactors) -> CoreResult<f64> {
        let base = decimal_from_f64(base_price, "base price")?;
        let breakdown = self.engine.pricing().compose(base, factors)?;
        Ok(decimal_to_f64(breakdown.display_price()))
    }

    fn report_text(&self, request_json: &str, month: u32, now: DateTime<Utc>) -> CoreResult<String> {
        let request: PredictionRequest = parse_json(request_json, "request")?;
        let market = self.market_for(&request.commodity)?;
        let result = self.engine.predict(&request, market, month)?;
        Ok(shared::render_report(&result, market, now))
    }
}

fn build_factors(
    region: Option<String>,
    season: Option<String>,
    demand: Option<String>,
    yield_per_hectare: Option<f64>,
    soil: Option<String>,
    irrigation: Option<String>,
) -> CoreResult<PriceFactors> {
    Ok(PriceFactors {
        region,
        season: season.map(|s| s.parse::<Season>()).transpose()?,
        demand: demand.map(|d| d.parse::<DemandLevel>()).transpose()?,
        yield_per_hectare: yield_per_hectare
            .map(|y| decimal_from_f64(y, "yield"))
            .transpose()?,
        soil,
        irrigation,
    })
}

fn extrapolate_values(prices: &[f64]) -> CoreResult<Vec<f64>> {
    let points = HistoricalSeries::from_f64(prices)?.extrapolate()?;
    Ok(points.iter().map(|p| decimal_to_f64(p.price)).collect())
}

fn season_for(region: &str, month: u32) -> CoreResult<Season> {
    PredictionEngine::standard().infer_season(region, month)
}

/// Extrapolate seven daily prices to days 8, 9 and 10
#[wasm_bindgen]
pub fn extrapolate_prices(prices: &[f64]) -> Result<Vec<f64>, JsValue> {
    extrapolate_values(prices).map_err(to_js_error)
}

/// Price multiplier for a yield in quintals/hectare
#[wasm_bindgen]
pub fn yield_multiplier(yield_per_hectare: f64) -> Result<f64, JsValue> {
    let quintals = decimal_from_f64(yield_per_hectare, "yield").map_err(to_js_error)?;
    Ok(decimal_to_f64(shared::yield_multiplier(quintals)))
}

/// Season for a region in a month (1-12)
#[wasm_bindgen]
pub fn infer_season(region: &str, month: u32) -> Result<String, JsValue> {
    season_for(region, month)
        .map(|s| s.to_string())
        .map_err(to_js_error)
}

/// Season for a region in the current browser month
#[wasm_bindgen]
pub fn current_season(region: &str) -> Result<String, JsValue> {
    infer_season(region, browser_month())
}

/// Yield quality label; unknown commodities use the default benchmark
#[wasm_bindgen]
pub fn assess_yield_quality(yield_per_hectare: f64, commodity: Option<String>) -> Result<String, JsValue> {
    let quintals: Decimal = decimal_from_f64(yield_per_hectare, "yield").map_err(to_js_error)?;
    let commodity = commodity.and_then(|c| c.parse::<Commodity>().ok());
    Ok(assess_quality(quintals, commodity).to_string())
}
