//! Built-in market dataset
//!
//! Snapshot of the forecasting service output for the supported commodities,
//! used when no live forecasting service is configured and by the browser
//! build.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    ConfidenceBand, ForecastSevenDays, HistoricalComparison, MarketDrivers, MarketIntelligence,
    MarketStatistics, MarketTrend, SeasonalOutlook, VolatilityLevel,
};
use crate::types::Commodity;

const GENERATED_ON: &str = "2026-01-10T23:02:27.740192";

/// Market snapshots keyed by commodity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketCatalog {
    markets: HashMap<Commodity, MarketIntelligence>,
}

impl MarketCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, commodity: Commodity, market: MarketIntelligence) {
        self.markets.insert(commodity, market);
    }

    pub fn get(&self, commodity: Commodity) -> Option<&MarketIntelligence> {
        self.markets.get(&commodity)
    }

    /// Commodities with data, in name order
    pub fn commodities(&self) -> Vec<Commodity> {
        let mut commodities: Vec<Commodity> = self.markets.keys().copied().collect();
        commodities.sort();
        commodities
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            Commodity::Banana,
            snapshot(Snapshot {
                commodity: Commodity::Banana,
                forecast: [245389, 245458, 244022, 242710, 241073, 241484, 241448],
                band: (222369, 264162, VolatilityLevel::High),
                last_price: 245195,
                weekly_change: -318,
                vs_last_year: 1069,
                positive: &["Lower mandi arrivals"],
                negative: &[],
                alerts: &[
                    "⚠️ High price volatility expected",
                    "⚠️ Seasonal downward pressure likely in coming weeks",
                ],
                outlook: (
                    MarketTrend::Bearish,
                    "3–6 weeks",
                    "Rabi harvest approaching, supply likely to increase",
                ),
            }),
        );
        catalog.insert(
            Commodity::Coconut,
            snapshot(Snapshot {
                commodity: Commodity::Coconut,
                forecast: [315050, 316075, 317520, 318030, 319245, 320080, 321025],
                band: (290000, 340000, VolatilityLevel::Medium),
                last_price: 314530,
                weekly_change: 125,
                vs_last_year: 845,
                positive: &["Festival demand", "Export orders"],
                negative: &["Transportation issues"],
                alerts: &[
                    "📈 Steady upward trend observed",
                    "🌴 Coastal region production stable",
                ],
                outlook: (
                    MarketTrend::Bullish,
                    "2–4 weeks",
                    "Festival season and export demand increasing",
                ),
            }),
        );
        catalog.insert(
            Commodity::Rice,
            snapshot(Snapshot {
                commodity: Commodity::Rice,
                forecast: [285075, 284520, 283890, 283045, 282560, 282030, 281580],
                band: (265000, 305000, VolatilityLevel::Low),
                last_price: 285540,
                weekly_change: -85,
                vs_last_year: 530,
                positive: &["Government procurement", "Stable demand"],
                negative: &["Good harvest"],
                alerts: &[
                    "📊 Stable market conditions",
                    "🏭 Mills operating at normal capacity",
                ],
                outlook: (
                    MarketTrend::Neutral,
                    "4–8 weeks",
                    "Balanced supply and demand with stable government policies",
                ),
            }),
        );
        catalog.insert(
            Commodity::Wheat,
            snapshot(Snapshot {
                commodity: Commodity::Wheat,
                forecast: [225040, 224580, 224030, 223560, 223090, 222640, 222080],
                band: (210000, 240000, VolatilityLevel::Low),
                last_price: 225520,
                weekly_change: -120,
                vs_last_year: -245,
                positive: &["Global price increase"],
                negative: &["High domestic stock", "Low export demand"],
                alerts: &[
                    "📉 Mild downward pressure",
                    "🌾 Rabi harvest completion increasing supply",
                ],
                outlook: (
                    MarketTrend::Bearish,
                    "3–5 weeks",
                    "Harvest season and high buffer stocks",
                ),
            }),
        );
        catalog
    }
}

/// Literal snapshot data; prices and percentages in hundredths
struct Snapshot {
    commodity: Commodity,
    forecast: [i64; 7],
    band: (i64, i64, VolatilityLevel),
    last_price: i64,
    weekly_change: i64,
    vs_last_year: i64,
    positive: &'static [&'static str],
    negative: &'static [&'static str],
    alerts: &'static [&'static str],
    outlook: (MarketTrend, &'static str, &'static str),
}

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn snapshot(data: Snapshot) -> MarketIntelligence {
    let (lower, upper, volatility_level) = data.band;
    let (trend, time_horizon, reason) = data.outlook;
    MarketIntelligence {
        commodity: data.commodity.name().to_string(),
        generated_on: Some(GENERATED_ON.to_string()),
        forecast_7_days: ForecastSevenDays::new(data.forecast.map(cents)),
        statistics: Some(MarketStatistics {
            last_price: cents(data.last_price),
            weekly_change_pct: cents(data.weekly_change),
        }),
        confidence_band: ConfidenceBand {
            lower_bound: cents(lower),
            upper_bound: cents(upper),
            volatility_level,
        },
        historical_comparison: HistoricalComparison {
            vs_last_week_pct: cents(data.weekly_change),
            vs_last_year_pct: Some(cents(data.vs_last_year)),
        },
        drivers: MarketDrivers {
            positive: to_strings(data.positive),
            negative: to_strings(data.negative),
        },
        alerts: to_strings(data.alerts),
        seasonal_outlook: Some(SeasonalOutlook {
            trend,
            time_horizon: time_horizon.to_string(),
            reason: reason.to_string(),
        }),
    }
}
