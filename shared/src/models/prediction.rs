//! Prediction request and result models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{ConfidenceBand, MarketTrend, YieldQuality};
use crate::forecast::NextThreeDays;
use crate::pricing::PriceBreakdown;
use crate::signal::ExitAdvice;
use crate::types::{Commodity, DemandLevel, Season};

/// Inputs from the prediction form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(length(min = 1, message = "Commodity is required"))]
    pub commodity: String,

    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,

    /// Inferred from region and month when absent
    #[serde(default)]
    pub season: Option<Season>,

    /// Inferred from commodity, season and region when absent
    #[serde(default)]
    pub demand: Option<DemandLevel>,

    /// Expected yield in quintals per hectare
    #[validate(range(min = 1, max = 1000, message = "Yield must be between 1 and 1000 quintals/hectare"))]
    pub yield_per_hectare: u32,

    #[serde(default)]
    pub soil: Option<String>,

    #[serde(default)]
    pub irrigation: Option<String>,

    /// Calendar month used for season inference; defaults to the current month
    #[serde(default)]
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<u32>,
}

impl PredictionRequest {
    pub fn new(commodity: impl Into<String>, region: impl Into<String>, yield_per_hectare: u32) -> Self {
        Self {
            commodity: commodity.into(),
            region: region.into(),
            season: None,
            demand: None,
            yield_per_hectare,
            soil: None,
            irrigation: None,
            month: None,
        }
    }
}

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub commodity: Commodity,
    pub region: String,
    pub season: Season,
    pub season_inferred: bool,
    pub demand: DemandLevel,
    pub demand_inferred: bool,
    pub yield_per_hectare: u32,
    pub yield_quality: YieldQuality,
    pub next_three_days: NextThreeDays,
    pub breakdown: PriceBreakdown,
    /// Composed price rounded to 2 decimal places
    pub predicted_price: Decimal,
    pub trend: MarketTrend,
    pub weekly_change_pct: Decimal,
    pub confidence_band: ConfidenceBand,
    pub exit_advice: ExitAdvice,
}
