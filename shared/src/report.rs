//! Plain-text prediction report and share text

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{MarketIntelligence, PredictionResult};
use crate::pricing::PriceFactor;
use crate::types::{round_price, Commodity};

const RULE: &str = "═══════════════════════════════════════════════════";

/// Report for one prediction, rendered through `Display`
pub struct PredictionReport<'a> {
    pub result: &'a PredictionResult,
    pub market: &'a MarketIntelligence,
    pub generated_at: DateTime<Utc>,
}

fn signed(value: Decimal) -> String {
    if value >= Decimal::ZERO {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", RULE)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", RULE)
}

fn bullets(f: &mut fmt::Formatter<'_>, items: &[String], empty: &str) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "• {}", empty);
    }
    for item in items {
        writeln!(f, "• {}", item)?;
    }
    Ok(())
}

impl fmt::Display for PredictionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        let market = self.market;
        let origin = |inferred: bool| if inferred { "inferred" } else { "selected" };

        writeln!(f, "HARVESTHUB - PREDICTION REPORT")?;
        writeln!(f, "Crop Price Prediction")?;
        writeln!(f)?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "Prediction ID: {}", self.generated_at.timestamp_millis())?;

        section(f, "CROP DETAILS")?;
        writeln!(f, "• Crop: {}", result.commodity)?;
        writeln!(f, "• Region: {}", result.region)?;
        writeln!(f, "• Season: {} ({})", result.season, origin(result.season_inferred))?;
        writeln!(f, "• Market Demand: {} ({})", result.demand, origin(result.demand_inferred))?;
        writeln!(
            f,
            "• Yield: {} quintals/hectare ({})",
            result.yield_per_hectare, result.yield_quality
        )?;

        section(f, "PRICE PREDICTION")?;
        writeln!(f, "Predicted Price: ₹{} per quintal", result.predicted_price)?;
        writeln!(f, "Current Market Price: ₹{}", market.base_price())?;
        writeln!(f, "Market Trend: {}", result.trend.label().to_uppercase())?;
        writeln!(f, "Weekly Change: {}%", signed(result.weekly_change_pct))?;
        match market.historical_comparison.vs_last_year_pct {
            Some(pct) => writeln!(f, "Yearly Comparison: {}%", signed(pct))?,
            None => writeln!(f, "Yearly Comparison: not available")?,
        }
        writeln!(
            f,
            "Exit Signal: {} ({})",
            result.exit_advice.signal, result.exit_advice.reason
        )?;

        section(f, "FORECAST (NEXT 10 DAYS)")?;
        writeln!(f, "Forecast (Days 1-7):")?;
        for (day, price) in market.forecast_7_days.series().points() {
            writeln!(f, "  Day {}: ₹{}", day, price)?;
        }
        writeln!(f)?;
        writeln!(f, "Extrapolated (Days 8-10):")?;
        for point in result.next_three_days.points() {
            writeln!(f, "  Day {}: ₹{}", point.day, point.price)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Price Range: ₹{} - ₹{}",
            result.confidence_band.lower_bound, result.confidence_band.upper_bound
        )?;
        writeln!(
            f,
            "Volatility: {}",
            result.confidence_band.volatility_level.label().to_uppercase()
        )?;

        section(f, "MARKET DRIVERS")?;
        writeln!(f, "POSITIVE FACTORS:")?;
        bullets(f, &market.drivers.positive, "None identified")?;
        writeln!(f)?;
        writeln!(f, "NEGATIVE FACTORS:")?;
        bullets(f, &market.drivers.negative, "None identified")?;

        section(f, "MARKET ALERTS")?;
        if market.alerts.is_empty() {
            writeln!(f, "No critical alerts at this time")?;
        } else {
            for alert in &market.alerts {
                writeln!(f, "{}", alert)?;
            }
        }

        if let Some(outlook) = &market.seasonal_outlook {
            section(f, "SEASONAL OUTLOOK")?;
            writeln!(f, "Trend: {}", outlook.trend.label().to_uppercase())?;
            writeln!(f, "Time Horizon: {}", outlook.time_horizon)?;
            writeln!(f, "Insight: {}", outlook.reason)?;
        }

        section(f, "ADJUSTMENT FACTORS")?;
        for adjustment in &result.breakdown.adjustments {
            let label = match adjustment.factor {
                PriceFactor::Region => "Region",
                PriceFactor::Season => "Season",
                PriceFactor::Demand => "Market Demand",
                PriceFactor::Yield => "Yield",
                PriceFactor::Soil => "Soil",
                PriceFactor::Irrigation => "Irrigation",
            };
            writeln!(f, "• {} ({}): {}%", label, adjustment.key, adjustment.percent())?;
        }

        section(f, "DISCLAIMER")?;
        writeln!(f, "This prediction is based on market data and historical trends.")?;
        writeln!(f, "For exact market prices, please visit your local mandi or")?;
        writeln!(f, "agricultural market.")?;
        writeln!(f)?;
        writeln!(f, "© {} HarvestHub. All rights reserved.", self.generated_at.year())
    }
}

/// Render the plain-text report for a prediction
pub fn render_report(
    result: &PredictionResult,
    market: &MarketIntelligence,
    generated_at: DateTime<Utc>,
) -> String {
    PredictionReport {
        result,
        market,
        generated_at,
    }
    .to_string()
}

/// One-line-per-field share text for a prediction
pub fn share_message(result: &PredictionResult) -> String {
    format!(
        "🌾 HarvestHub Prediction\n\nCrop: {}\nRegion: {}\nSeason: {}\nMarket Demand: {}\nPredicted Price: ₹{}/Quintal",
        result.commodity,
        result.region,
        result.season,
        result.demand,
        round_price(result.predicted_price)
    )
}

/// Download name for a report, e.g. `HarvestHub_Banana_Punjab_2026-01-10.txt`
pub fn report_file_name(commodity: Commodity, region: &str, date: NaiveDate) -> String {
    format!(
        "HarvestHub_{}_{}_{}.txt",
        commodity,
        region.trim(),
        date.format("%Y-%m-%d")
    )
}
