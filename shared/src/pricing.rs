//! Price adjustment composer
//!
//! The predicted price is the base price multiplied by one multiplier per
//! supplied factor. Categorical factors are looked up in tables; keys missing
//! from a table are neutral (1.00). Yield uses a piecewise rule.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, PredictionError};
use crate::types::{round_price, DemandLevel, Season};

/// Yield above which supply is high and the price drops
pub const HIGH_YIELD_THRESHOLD: u32 = 70;
/// Yield below which supply is low and the price rises
pub const LOW_YIELD_THRESHOLD: u32 = 30;

/// Categorical key to multiplier map with a neutral fallback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiplierTable {
    entries: HashMap<String, Decimal>,
}

impl MultiplierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MultiplierTable::insert`] for literal tables
    pub fn with(mut self, key: &str, multiplier: Decimal) -> Self {
        self.entries.insert(key.to_string(), multiplier);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, multiplier: Decimal) -> CoreResult<()> {
        let key = key.into();
        if multiplier <= Decimal::ZERO {
            return Err(PredictionError::invalid(format!(
                "multiplier for '{}' must be positive, got {}",
                key, multiplier
            )));
        }
        self.entries.insert(key, multiplier);
        Ok(())
    }

    /// Multiplier for `key`, or 1.00 when the key is unknown
    pub fn lookup(&self, key: &str) -> Decimal {
        self.entries.get(key).copied().unwrap_or(Decimal::ONE)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Override entries with those of `other`, rejecting non-positive values.
    /// A key matching an existing entry case-insensitively replaces that entry.
    pub fn merge(&mut self, other: &MultiplierTable) -> CoreResult<()> {
        for (key, multiplier) in &other.entries {
            let key = self
                .entries
                .keys()
                .find(|existing| existing.eq_ignore_ascii_case(key))
                .cloned()
                .unwrap_or_else(|| key.clone());
            self.insert(key, *multiplier)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> CoreResult<()> {
        match self.entries.iter().find(|(_, m)| **m <= Decimal::ZERO) {
            Some((key, m)) => Err(PredictionError::invalid(format!(
                "multiplier for '{}' must be positive, got {}",
                key, m
            ))),
            None => Ok(()),
        }
    }
}

/// Piecewise yield multiplier. Thresholds are exclusive: 30 and 70 are neutral.
pub fn yield_multiplier(yield_per_hectare: Decimal) -> Decimal {
    if yield_per_hectare > Decimal::from(HIGH_YIELD_THRESHOLD) {
        Decimal::new(95, 2)
    } else if yield_per_hectare < Decimal::from(LOW_YIELD_THRESHOLD) {
        Decimal::new(105, 2)
    } else {
        Decimal::ONE
    }
}

/// Dimension an adjustment comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFactor {
    Region,
    Season,
    Demand,
    Yield,
    Soil,
    Irrigation,
}

/// One applied multiplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub factor: PriceFactor,
    pub key: String,
    pub multiplier: Decimal,
}

impl Adjustment {
    /// Whole-percent effect on the price, e.g. 1.08 -> 8, 0.95 -> -5
    pub fn percent(&self) -> Decimal {
        ((self.multiplier - Decimal::ONE) * Decimal::ONE_HUNDRED).round()
    }
}

/// Factors supplied for one price composition. Absent factors are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFactors {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub demand: Option<DemandLevel>,
    #[serde(default)]
    pub yield_per_hectare: Option<Decimal>,
    #[serde(default)]
    pub soil: Option<String>,
    #[serde(default)]
    pub irrigation: Option<String>,
}

impl PriceFactors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn demand(mut self, demand: DemandLevel) -> Self {
        self.demand = Some(demand);
        self
    }

    pub fn yield_per_hectare(mut self, quintals: Decimal) -> Self {
        self.yield_per_hectare = Some(quintals);
        self
    }

    pub fn soil(mut self, soil: impl Into<String>) -> Self {
        self.soil = Some(soil.into());
        self
    }

    pub fn irrigation(mut self, irrigation: impl Into<String>) -> Self {
        self.irrigation = Some(irrigation.into());
        self
    }
}

/// Result of a price composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub adjustments: Vec<Adjustment>,
    /// Unrounded composed price
    pub composed_price: Decimal,
}

impl PriceBreakdown {
    pub fn total_multiplier(&self) -> Decimal {
        self.adjustments
            .iter()
            .fold(Decimal::ONE, |acc, a| acc * a.multiplier)
    }

    pub fn multiplier_for(&self, factor: PriceFactor) -> Option<Decimal> {
        self.adjustments
            .iter()
            .find(|a| a.factor == factor)
            .map(|a| a.multiplier)
    }

    /// Composed price rounded for display
    pub fn display_price(&self) -> Decimal {
        round_price(self.composed_price)
    }
}

/// Multiplier tables used to compose prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub regions: MultiplierTable,
    pub seasons: MultiplierTable,
    pub demand: MultiplierTable,
    pub soils: MultiplierTable,
    pub irrigation: MultiplierTable,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::canonical()
    }
}

impl PricingConfig {
    /// The canonical multiplier tables
    pub fn canonical() -> Self {
        let m = |hundredths: i64| Decimal::new(hundredths, 2);
        Self {
            regions: MultiplierTable::new()
                .with("Punjab", m(105))
                .with("Haryana", m(103))
                .with("Uttar Pradesh", m(100))
                .with("Maharashtra", m(98))
                .with("Gujarat", m(97))
                .with("Rajasthan", m(102))
                .with("Madhya Pradesh", m(99))
                .with("Karnataka", m(96)),
            seasons: MultiplierTable::new()
                .with(Season::Kharif.label(), m(108))
                .with(Season::Rabi.label(), m(100))
                .with(Season::Zaid.label(), m(103)),
            demand: MultiplierTable::new()
                .with(DemandLevel::VeryHigh.label(), m(115))
                .with(DemandLevel::High.label(), m(110))
                .with(DemandLevel::Medium.label(), m(100))
                .with(DemandLevel::Low.label(), m(90)),
            soils: MultiplierTable::new()
                .with("Loamy", m(105))
                .with("Silt", m(102))
                .with("Clay", m(95))
                .with("Sandy", m(90))
                .with("Peaty", m(92)),
            irrigation: MultiplierTable::new()
                .with("Drip", m(108))
                .with("TubeWell", m(103))
                .with("Canal", m(100))
                .with("Rainfed", m(95)),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.regions.validate()?;
        self.seasons.validate()?;
        self.demand.validate()?;
        self.soils.validate()?;
        self.irrigation.validate()
    }

    /// Compose `base_price × Π multipliers` for the supplied factors
    pub fn compose(&self, base_price: Decimal, factors: &PriceFactors) -> CoreResult<PriceBreakdown> {
        if base_price < Decimal::ZERO {
            return Err(PredictionError::invalid(format!(
                "base price must not be negative, got {}",
                base_price
            )));
        }

        let mut adjustments = Vec::new();
        let mut push = |factor: PriceFactor, key: &str, multiplier: Decimal| {
            adjustments.push(Adjustment {
                factor,
                key: key.to_string(),
                multiplier,
            });
        };

        if let Some(region) = factors.region.as_deref() {
            push(PriceFactor::Region, region, self.regions.lookup(region));
        }
        if let Some(season) = factors.season {
            push(PriceFactor::Season, season.label(), self.seasons.lookup(season.label()));
        }
        if let Some(demand) = factors.demand {
            push(PriceFactor::Demand, demand.label(), self.demand.lookup(demand.label()));
        }
        if let Some(quintals) = factors.yield_per_hectare {
            push(PriceFactor::Yield, &quintals.to_string(), yield_multiplier(quintals));
        }
        if let Some(soil) = factors.soil.as_deref() {
            push(PriceFactor::Soil, soil, self.soils.lookup(soil));
        }
        if let Some(irrigation) = factors.irrigation.as_deref() {
            push(PriceFactor::Irrigation, irrigation, self.irrigation.lookup(irrigation));
        }

        let composed_price = adjustments
            .iter()
            .try_fold(base_price, |price, a| price.checked_mul(a.multiplier))
            .ok_or_else(|| PredictionError::invalid("composed price is out of range"))?;

        Ok(PriceBreakdown {
            base_price,
            adjustments,
            composed_price,
        })
    }
}

/// Compose a price against the given tables
pub fn compose_price(
    base_price: Decimal,
    factors: &PriceFactors,
    config: &PricingConfig,
) -> CoreResult<PriceBreakdown> {
    config.compose(base_price, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_no_factors_returns_base() {
        let config = PricingConfig::canonical();
        let breakdown = compose_price(dec("2451.95"), &PriceFactors::new(), &config).unwrap();
        assert_eq!(breakdown.composed_price, dec("2451.95"));
        assert!(breakdown.adjustments.is_empty());
        assert_eq!(breakdown.total_multiplier(), Decimal::ONE);
    }

    #[test]
    fn test_unknown_region_is_neutral() {
        let config = PricingConfig::canonical();
        let base = dec("1000");
        let with_unknown = compose_price(base, &PriceFactors::new().region("Kerala"), &config).unwrap();
        let without = compose_price(base, &PriceFactors::new(), &config).unwrap();
        assert_eq!(with_unknown.composed_price, without.composed_price);
        assert_eq!(with_unknown.multiplier_for(PriceFactor::Region), Some(Decimal::ONE));
    }

    #[test]
    fn test_yield_multiplier_boundaries() {
        assert_eq!(yield_multiplier(Decimal::from(70)), Decimal::ONE);
        assert_eq!(yield_multiplier(Decimal::from(30)), Decimal::ONE);
        assert_eq!(yield_multiplier(Decimal::from(71)), dec("0.95"));
        assert_eq!(yield_multiplier(Decimal::from(29)), dec("1.05"));
        assert_eq!(yield_multiplier(Decimal::from(50)), Decimal::ONE);
    }

    #[test]
    fn test_kharif_medium_unlisted_region() {
        let config = PricingConfig::canonical();
        let factors = PriceFactors::new()
            .region("Kerala")
            .season(Season::Kharif)
            .demand(DemandLevel::Medium)
            .yield_per_hectare(Decimal::from(50));
        let breakdown = compose_price(dec("2451.95"), &factors, &config).unwrap();
        assert_eq!(breakdown.composed_price, dec("2648.106"));
        assert_eq!(breakdown.display_price(), dec("2648.11"));
    }

    #[test]
    fn test_kharif_medium_maharashtra() {
        let config = PricingConfig::canonical();
        let factors = PriceFactors::new()
            .region("Maharashtra")
            .season(Season::Kharif)
            .demand(DemandLevel::Medium)
            .yield_per_hectare(Decimal::from(50));
        let breakdown = compose_price(dec("2451.95"), &factors, &config).unwrap();
        assert_eq!(breakdown.composed_price, dec("2595.14388"));
        assert_eq!(breakdown.display_price(), dec("2595.14"));
    }

    #[test]
    fn test_soil_and_irrigation_factors() {
        let config = PricingConfig::canonical();
        let factors = PriceFactors::new().soil("Loamy").irrigation("Drip");
        let breakdown = compose_price(dec("100"), &factors, &config).unwrap();
        assert_eq!(breakdown.composed_price, dec("113.4"));
        assert_eq!(breakdown.adjustments.len(), 2);
    }

    #[test]
    fn test_negative_base_price_is_rejected() {
        let config = PricingConfig::canonical();
        let result = compose_price(dec("-1"), &PriceFactors::new(), &config);
        assert!(matches!(result, Err(PredictionError::InvalidInput(_))));
        assert!(compose_price(Decimal::ZERO, &PriceFactors::new(), &config).is_ok());
    }

    #[test]
    fn test_adjustment_percent() {
        let adjustment = Adjustment {
            factor: PriceFactor::Season,
            key: "Kharif".to_string(),
            multiplier: dec("1.08"),
        };
        assert_eq!(adjustment.percent(), dec("8"));
        let adjustment = Adjustment {
            factor: PriceFactor::Demand,
            key: "Low".to_string(),
            multiplier: dec("0.90"),
        };
        assert_eq!(adjustment.percent(), dec("-10"));
    }

    #[test]
    fn test_merge_overrides_and_validates() {
        let mut regions = PricingConfig::canonical().regions;
        let overrides = MultiplierTable::new().with("Kerala", dec("1.04"));
        regions.merge(&overrides).unwrap();
        assert_eq!(regions.lookup("Kerala"), dec("1.04"));
        assert_eq!(regions.lookup("Punjab"), dec("1.05"));

        let lowercase = MultiplierTable::new().with("punjab", dec("1.07"));
        regions.merge(&lowercase).unwrap();
        assert_eq!(regions.lookup("Punjab"), dec("1.07"));
        assert!(!regions.contains("punjab"));

        let bad = MultiplierTable::new().with("Bihar", dec("-0.5"));
        assert!(regions.merge(&bad).is_err());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_table_deserializes_from_map() {
        let table: MultiplierTable = serde_json::from_str(r#"{"Punjab": 1.1}"#).unwrap();
        assert_eq!(table.lookup("Punjab"), dec("1.1"));
        assert_eq!(table.len(), 1);
    }
}
