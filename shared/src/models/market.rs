//! Market dataset models
//!
//! The per-commodity market snapshot produced by the price forecasting
//! service, or by the built-in catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forecast::{HistoricalSeries, HISTORY_DAYS};

/// Seven-day price forecast (₹ per quintal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSevenDays {
    pub day_1: Decimal,
    pub day_2: Decimal,
    pub day_3: Decimal,
    pub day_4: Decimal,
    pub day_5: Decimal,
    pub day_6: Decimal,
    pub day_7: Decimal,
}

impl ForecastSevenDays {
    pub fn new(prices: [Decimal; HISTORY_DAYS]) -> Self {
        let [day_1, day_2, day_3, day_4, day_5, day_6, day_7] = prices;
        Self {
            day_1,
            day_2,
            day_3,
            day_4,
            day_5,
            day_6,
            day_7,
        }
    }

    pub fn values(&self) -> [Decimal; HISTORY_DAYS] {
        [
            self.day_1, self.day_2, self.day_3, self.day_4, self.day_5, self.day_6, self.day_7,
        ]
    }

    pub fn series(&self) -> HistoricalSeries {
        HistoricalSeries::from_array(self.values())
    }

    /// Highest forecast price
    pub fn peak(&self) -> Decimal {
        self.values().into_iter().max().unwrap_or(self.day_1)
    }
}

/// Latest observed market statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatistics {
    pub last_price: Decimal,
    pub weekly_change_pct: Decimal,
}

/// Qualitative price volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            VolatilityLevel::Low => "low",
            VolatilityLevel::Medium => "medium",
            VolatilityLevel::High => "high",
        }
    }
}

/// Expected price range supplied with the forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub volatility_level: VolatilityLevel,
}

/// Price change against earlier periods, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalComparison {
    pub vs_last_week_pct: Decimal,
    /// Missing when there is less than a year of history
    #[serde(default)]
    pub vs_last_year_pct: Option<Decimal>,
}

/// Factors pushing the price up or down
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDrivers {
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

/// Direction of the seasonal market trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl MarketTrend {
    pub fn label(&self) -> &'static str {
        match self {
            MarketTrend::Bullish => "bullish",
            MarketTrend::Bearish => "bearish",
            MarketTrend::Neutral => "neutral",
        }
    }
}

/// Seasonal outlook attached to a market snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalOutlook {
    pub trend: MarketTrend,
    pub time_horizon: String,
    pub reason: String,
}

impl SeasonalOutlook {
    /// Calendar-driven outlook for a month (1-12)
    pub fn for_month(month: u32) -> Self {
        let (trend, time_horizon, reason) = match month {
            1 | 2 => (
                MarketTrend::Bearish,
                "3–6 weeks",
                "Rabi harvest approaching, supply likely to increase",
            ),
            3 | 4 => (
                MarketTrend::Bearish,
                "current",
                "Active harvest season, high arrivals",
            ),
            8 | 9 => (
                MarketTrend::Bullish,
                "2–4 weeks",
                "Monsoon withdrawal, supply tightening expected",
            ),
            _ => (
                MarketTrend::Neutral,
                "near term",
                "No major seasonal transition",
            ),
        };
        Self {
            trend,
            time_horizon: time_horizon.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Market snapshot for one commodity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIntelligence {
    pub commodity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<String>,
    pub forecast_7_days: ForecastSevenDays,
    #[serde(default)]
    pub statistics: Option<MarketStatistics>,
    pub confidence_band: ConfidenceBand,
    pub historical_comparison: HistoricalComparison,
    #[serde(default)]
    pub drivers: MarketDrivers,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub seasonal_outlook: Option<SeasonalOutlook>,
}

impl MarketIntelligence {
    /// Price the adjustments start from: the last observed price, or the
    /// first forecast day when no statistics were supplied.
    pub fn base_price(&self) -> Decimal {
        self.statistics
            .map(|s| s.last_price)
            .unwrap_or(self.forecast_7_days.day_1)
    }

    pub fn weekly_change_pct(&self) -> Decimal {
        self.statistics
            .map(|s| s.weekly_change_pct)
            .unwrap_or(self.historical_comparison.vs_last_week_pct)
    }

    pub fn trend(&self) -> MarketTrend {
        self.seasonal_outlook
            .as_ref()
            .map(|o| o.trend)
            .unwrap_or_default()
    }

    /// Fill the optional sections a partial upstream response may omit
    pub fn normalized(mut self, month: u32) -> Self {
        if self.statistics.is_none() {
            self.statistics = Some(MarketStatistics {
                last_price: self.forecast_7_days.day_1,
                weekly_change_pct: self.historical_comparison.vs_last_week_pct,
            });
        }
        if self.seasonal_outlook.is_none() {
            self.seasonal_outlook = Some(SeasonalOutlook::for_month(month));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIAL: &str = r#"{
        "commodity": "Rice",
        "forecast_7_days": {
            "day_1": 2850.75, "day_2": 2845.20, "day_3": 2838.90, "day_4": 2830.45,
            "day_5": 2825.60, "day_6": 2820.30, "day_7": 2815.80
        },
        "confidence_band": { "lower_bound": 2650, "upper_bound": 3050, "volatility_level": "low" },
        "historical_comparison": { "vs_last_week_pct": -0.85, "vs_last_year_pct": null }
    }"#;

    #[test]
    fn test_partial_response_falls_back_to_day_one() {
        let market: MarketIntelligence = serde_json::from_str(PARTIAL).unwrap();
        assert!(market.statistics.is_none());
        assert_eq!(market.base_price(), Decimal::new(285075, 2));
        assert_eq!(market.weekly_change_pct(), Decimal::new(-85, 2));
        assert_eq!(market.trend(), MarketTrend::Neutral);
        assert!(market.drivers.positive.is_empty());
        assert!(market.alerts.is_empty());
    }

    #[test]
    fn test_normalized_fills_missing_sections() {
        let market: MarketIntelligence = serde_json::from_str(PARTIAL).unwrap();
        let market = market.normalized(8);
        let stats = market.statistics.unwrap();
        assert_eq!(stats.last_price, Decimal::new(285075, 2));
        assert_eq!(market.trend(), MarketTrend::Bullish);
    }

    #[test]
    fn test_outlook_by_month() {
        assert_eq!(SeasonalOutlook::for_month(1).trend, MarketTrend::Bearish);
        assert_eq!(SeasonalOutlook::for_month(4).time_horizon, "current");
        assert_eq!(SeasonalOutlook::for_month(9).trend, MarketTrend::Bullish);
        assert_eq!(SeasonalOutlook::for_month(6).trend, MarketTrend::Neutral);
    }

    #[test]
    fn test_forecast_peak() {
        let forecast = ForecastSevenDays::new([1, 9, 3, 4, 5, 6, 7].map(Decimal::from));
        assert_eq!(forecast.peak(), Decimal::from(9));
        assert_eq!(forecast.values()[6], Decimal::from(7));
    }
}
