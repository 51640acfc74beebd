//! Yield quality assessment against crop-specific benchmarks

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Commodity;

/// Benchmark yields in quintals per hectare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldProfile {
    pub optimal: u32,
    pub range_low: u32,
    pub range_high: u32,
}

impl YieldProfile {
    pub const DEFAULT: YieldProfile = YieldProfile {
        optimal: 50,
        range_low: 30,
        range_high: 70,
    };

    pub fn for_commodity(commodity: Option<Commodity>) -> Self {
        let (optimal, range_low, range_high) = match commodity {
            Some(Commodity::Banana) => (60, 40, 80),
            Some(Commodity::Coconut) => (45, 30, 60),
            Some(Commodity::Rice) => (55, 40, 70),
            Some(Commodity::Wheat) => (50, 35, 65),
            None => return Self::DEFAULT,
        };
        Self {
            optimal,
            range_low,
            range_high,
        }
    }
}

/// How a yield compares with the crop benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldQuality {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl fmt::Display for YieldQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YieldQuality::Excellent => write!(f, "Excellent"),
            YieldQuality::Good => write!(f, "Good"),
            YieldQuality::Average => write!(f, "Average"),
            YieldQuality::BelowAverage => write!(f, "Below Average"),
        }
    }
}

/// Classify a yield (quintals/hectare) for a commodity
pub fn assess_yield_quality(yield_per_hectare: Decimal, commodity: Option<Commodity>) -> YieldQuality {
    let profile = YieldProfile::for_commodity(commodity);
    if yield_per_hectare >= Decimal::from(profile.range_high) {
        YieldQuality::Excellent
    } else if yield_per_hectare >= Decimal::from(profile.optimal) {
        YieldQuality::Good
    } else if yield_per_hectare >= Decimal::from(profile.range_low) {
        YieldQuality::Average
    } else {
        YieldQuality::BelowAverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banana_thresholds() {
        let banana = Some(Commodity::Banana);
        assert_eq!(assess_yield_quality(Decimal::from(80), banana), YieldQuality::Excellent);
        assert_eq!(assess_yield_quality(Decimal::from(79), banana), YieldQuality::Good);
        assert_eq!(assess_yield_quality(Decimal::from(60), banana), YieldQuality::Good);
        assert_eq!(assess_yield_quality(Decimal::from(40), banana), YieldQuality::Average);
        assert_eq!(assess_yield_quality(Decimal::from(39), banana), YieldQuality::BelowAverage);
    }

    #[test]
    fn test_default_profile() {
        assert_eq!(assess_yield_quality(Decimal::from(70), None), YieldQuality::Excellent);
        assert_eq!(assess_yield_quality(Decimal::from(50), None), YieldQuality::Good);
        assert_eq!(assess_yield_quality(Decimal::from(29), None), YieldQuality::BelowAverage);
    }

    #[test]
    fn test_display() {
        assert_eq!(YieldQuality::BelowAverage.to_string(), "Below Average");
    }
}
