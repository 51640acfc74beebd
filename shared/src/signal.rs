//! Sell/hold advice derived from the market snapshot

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MarketIntelligence, MarketTrend, VolatilityLevel};

/// Minimum remaining upside (percent) worth holding for
pub const MIN_UPSIDE_PCT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExitSignal {
    Hold,
    Sell,
}

impl fmt::Display for ExitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitSignal::Hold => write!(f, "HOLD"),
            ExitSignal::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitAdvice {
    pub signal: ExitSignal,
    pub reason: String,
}

impl ExitAdvice {
    fn sell(reason: &str) -> Self {
        Self {
            signal: ExitSignal::Sell,
            reason: reason.to_string(),
        }
    }
}

/// Decide whether a farmer holding stock should sell now.
///
/// Rules are checked in order; the first match wins.
pub fn decide_exit_signal(market: &MarketIntelligence) -> ExitAdvice {
    let forecast = &market.forecast_7_days;
    let last = forecast.day_7;
    let peak = forecast.peak();

    if last < forecast.day_5 {
        return ExitAdvice::sell("Short-term momentum weakening");
    }

    if market.trend() == MarketTrend::Bearish {
        return ExitAdvice::sell("Seasonal demand expected to weaken");
    }

    let upside_pct = (peak - last)
        .checked_div(last)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO);
    if upside_pct < Decimal::from(MIN_UPSIDE_PCT) {
        return ExitAdvice::sell("Limited upside remaining");
    }

    if market.confidence_band.volatility_level == VolatilityLevel::High && last < peak {
        return ExitAdvice::sell("High volatility with weak trend");
    }

    ExitAdvice {
        signal: ExitSignal::Hold,
        reason: "Trend remains favorable".to_string(),
    }
}
