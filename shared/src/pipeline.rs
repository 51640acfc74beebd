//! End-to-end price prediction
//!
//! Combines season and demand inference, forecast extrapolation and price
//! composition over one immutable set of tables.

use rust_decimal::Decimal;

use crate::error::{CoreResult, PredictionError};
use crate::forecast::NextThreeDays;
use crate::models::{
    assess_yield_quality, DemandPatterns, MarketIntelligence, PredictionRequest, PredictionResult,
    SeasonCalendar,
};
use crate::pricing::{PriceFactors, PricingConfig};
use crate::signal::decide_exit_signal;
use crate::types::{Commodity, DemandLevel, Season};
use crate::validation::{validate_month, validate_prediction_request};

/// Prediction tables, built once and shared read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionEngine {
    pricing: PricingConfig,
    calendar: SeasonCalendar,
    demand: DemandPatterns,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl PredictionEngine {
    pub fn new(pricing: PricingConfig, calendar: SeasonCalendar, demand: DemandPatterns) -> Self {
        Self {
            pricing,
            calendar,
            demand,
        }
    }

    /// Canonical multipliers, season calendar and demand patterns
    pub fn standard() -> Self {
        Self::new(
            PricingConfig::canonical(),
            SeasonCalendar::default(),
            DemandPatterns::standard(),
        )
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    pub fn demand_patterns(&self) -> &DemandPatterns {
        &self.demand
    }

    pub fn infer_season(&self, region: &str, month: u32) -> CoreResult<Season> {
        validate_month(month).map_err(PredictionError::invalid)?;
        Ok(self.calendar.infer(region, month))
    }

    pub fn infer_demand(&self, commodity: Commodity, season: Season, region: &str) -> DemandLevel {
        self.demand.infer(commodity, season, region)
    }

    /// Run the full prediction for one request.
    ///
    /// `current_month` is used for season inference unless the request
    /// carries its own month.
    pub fn predict(
        &self,
        request: &PredictionRequest,
        market: &MarketIntelligence,
        current_month: u32,
    ) -> CoreResult<PredictionResult> {
        let commodity = validate_prediction_request(request)?;
        let region = request.region.trim();

        let (season, season_inferred) = match request.season {
            Some(season) => (season, false),
            None => (
                self.infer_season(region, request.month.unwrap_or(current_month))?,
                true,
            ),
        };
        let (demand, demand_inferred) = match request.demand {
            Some(demand) => (demand, false),
            None => (self.infer_demand(commodity, season, region), true),
        };

        let next_three_days = NextThreeDays::from(market.forecast_7_days.series().extrapolate()?);

        let yield_per_hectare = Decimal::from(request.yield_per_hectare);
        let mut factors = PriceFactors::new()
            .region(region)
            .season(season)
            .demand(demand)
            .yield_per_hectare(yield_per_hectare);
        factors.soil = request.soil.clone();
        factors.irrigation = request.irrigation.clone();

        let breakdown = self.pricing.compose(market.base_price(), &factors)?;
        let predicted_price = breakdown.display_price();

        Ok(PredictionResult {
            commodity,
            region: region.to_string(),
            season,
            season_inferred,
            demand,
            demand_inferred,
            yield_per_hectare: request.yield_per_hectare,
            yield_quality: assess_yield_quality(yield_per_hectare, Some(commodity)),
            next_three_days,
            breakdown,
            predicted_price,
            trend: market.trend(),
            weekly_change_pct: market.weekly_change_pct(),
            confidence_band: market.confidence_band,
            exit_advice: decide_exit_signal(market),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MarketCatalog;
    use crate::models::YieldQuality;
    use crate::pricing::PriceFactor;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn banana() -> MarketIntelligence {
        MarketCatalog::builtin()
            .get(Commodity::Banana)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_explicit_factors_compose_price() {
        let engine = PredictionEngine::standard();
        let mut request = PredictionRequest::new("Banana", "Kerala", 50);
        request.season = Some(Season::Kharif);
        request.demand = Some(DemandLevel::Medium);

        let result = engine.predict(&request, &banana(), 1).unwrap();
        assert_eq!(result.predicted_price, dec("2648.11"));
        assert_eq!(result.breakdown.composed_price, dec("2648.106"));
        assert!(!result.season_inferred);
        assert!(!result.demand_inferred);
        assert_eq!(result.next_three_days.day_8, dec("2398.38"));
        assert_eq!(result.next_three_days.day_10, dec("2382.15"));
    }

    #[test]
    fn test_season_and_demand_are_inferred() {
        let engine = PredictionEngine::standard();
        let request = PredictionRequest::new("Banana", "Maharashtra", 50);

        let result = engine.predict(&request, &banana(), 7).unwrap();
        assert_eq!(result.season, Season::Kharif);
        assert!(result.season_inferred);
        assert_eq!(result.demand, DemandLevel::High);
        assert!(result.demand_inferred);
        // 2451.95 × 0.98 × 1.08 × 1.10 × 1.00
        assert_eq!(result.breakdown.composed_price, dec("2854.6582680"));
        assert_eq!(result.predicted_price, dec("2854.66"));
    }

    #[test]
    fn test_request_month_overrides_current_month() {
        let engine = PredictionEngine::standard();
        let mut request = PredictionRequest::new("Wheat", "Punjab", 50);
        request.month = Some(12);

        let result = engine.predict(&request, &banana(), 7).unwrap();
        assert_eq!(result.season, Season::Rabi);
        assert_eq!(result.demand, DemandLevel::VeryHigh);
    }

    #[test]
    fn test_optional_soil_and_irrigation() {
        let engine = PredictionEngine::standard();
        let mut request = PredictionRequest::new("Banana", "Kerala", 80);
        request.season = Some(Season::Rabi);
        request.demand = Some(DemandLevel::Medium);
        request.soil = Some("Clay".to_string());
        request.irrigation = Some("Unknown".to_string());

        let result = engine.predict(&request, &banana(), 1).unwrap();
        assert_eq!(result.breakdown.multiplier_for(PriceFactor::Soil), Some(dec("0.95")));
        assert_eq!(result.breakdown.multiplier_for(PriceFactor::Irrigation), Some(Decimal::ONE));
        assert_eq!(result.breakdown.multiplier_for(PriceFactor::Yield), Some(dec("0.95")));
        assert_eq!(result.yield_quality, YieldQuality::Excellent);
    }

    #[test]
    fn test_invalid_requests_fail() {
        let engine = PredictionEngine::standard();
        let request = PredictionRequest::new("Banana", "Punjab", 5000);
        assert!(matches!(
            engine.predict(&request, &banana(), 1),
            Err(PredictionError::InvalidInput(_))
        ));
        let request = PredictionRequest::new("Mango", "Punjab", 50);
        assert!(matches!(
            engine.predict(&request, &banana(), 1),
            Err(PredictionError::UnknownCommodity(_))
        ));
    }

    #[test]
    fn test_infer_season_rejects_bad_month() {
        let engine = PredictionEngine::standard();
        assert!(engine.infer_season("Punjab", 0).is_err());
        assert_eq!(engine.infer_season("Punjab", 8).unwrap(), Season::Kharif);
    }
}
