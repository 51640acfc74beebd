//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, PredictionError};

/// Decimal places used for every displayed price
pub const PRICE_DECIMALS: u32 = 2;

/// Round a price for display: 2 decimal places, midpoint away from zero.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a float received at an API boundary into a decimal.
///
/// NaN and infinities are rejected.
pub fn decimal_from_f64(value: f64, what: &str) -> CoreResult<Decimal> {
    if !value.is_finite() {
        return Err(PredictionError::invalid(format!(
            "{} must be a finite number",
            what
        )));
    }
    Decimal::try_from(value)
        .map_err(|_| PredictionError::invalid(format!("{} is out of range: {}", what, value)))
}

/// Convert a decimal back to a float for callers that only speak `f64`
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Commodities with market data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Commodity {
    Banana,
    Coconut,
    Rice,
    Wheat,
}

impl Commodity {
    pub const ALL: [Commodity; 4] = [
        Commodity::Banana,
        Commodity::Coconut,
        Commodity::Rice,
        Commodity::Wheat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Commodity::Banana => "Banana",
            Commodity::Coconut => "Coconut",
            Commodity::Rice => "Rice",
            Commodity::Wheat => "Wheat",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Commodity {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Commodity::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| PredictionError::UnknownCommodity(name.to_string()))
    }
}

/// Indian agricultural seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Monsoon-sown
    Kharif,
    /// Winter-sown
    Rabi,
    /// Summer-sown
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Season::ALL
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| PredictionError::invalid(format!("Unknown season: {}", label)))
    }
}

/// Market demand level for a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl DemandLevel {
    pub const ALL: [DemandLevel; 4] = [
        DemandLevel::Low,
        DemandLevel::Medium,
        DemandLevel::High,
        DemandLevel::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DemandLevel::Low => "Low",
            DemandLevel::Medium => "Medium",
            DemandLevel::High => "High",
            DemandLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DemandLevel {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        DemandLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| PredictionError::invalid(format!("Unknown demand level: {}", label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price_midpoint_away_from_zero() {
        assert_eq!(round_price(Decimal::new(2648106, 3)), Decimal::new(264811, 2));
        assert_eq!(round_price(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_price(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }

    #[test]
    fn test_decimal_from_f64_rejects_non_finite() {
        assert!(decimal_from_f64(f64::NAN, "price").is_err());
        assert!(decimal_from_f64(f64::INFINITY, "price").is_err());
        assert!(decimal_from_f64(f64::NEG_INFINITY, "price").is_err());
        assert_eq!(
            decimal_from_f64(2451.95, "price").unwrap(),
            Decimal::new(245195, 2)
        );
    }

    #[test]
    fn test_commodity_parsing_trims() {
        assert_eq!(" Rice ".parse::<Commodity>().unwrap(), Commodity::Rice);
        assert_eq!(
            "Maize".parse::<Commodity>(),
            Err(PredictionError::UnknownCommodity("Maize".to_string()))
        );
    }

    #[test]
    fn test_demand_level_labels() {
        assert_eq!(DemandLevel::VeryHigh.label(), "Very High");
        assert_eq!("very high".parse::<DemandLevel>().unwrap(), DemandLevel::VeryHigh);
        let json = serde_json::to_string(&DemandLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
    }

    #[test]
    fn test_season_parsing() {
        assert_eq!("Kharif".parse::<Season>().unwrap(), Season::Kharif);
        assert_eq!("zaid".parse::<Season>().unwrap(), Season::Zaid);
        assert!("Monsoon".parse::<Season>().is_err());
    }
}
