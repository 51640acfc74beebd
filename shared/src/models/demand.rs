//! Market demand inference by commodity, season and region

use std::collections::HashMap;

use crate::types::{Commodity, DemandLevel, Season};

/// Demand for one commodity in one season, with regional exceptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandRule {
    pub default: DemandLevel,
    pub regional: HashMap<String, DemandLevel>,
}

impl DemandRule {
    pub fn new(default: DemandLevel) -> Self {
        Self {
            default,
            regional: HashMap::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>, level: DemandLevel) -> Self {
        self.regional.insert(region.into(), level);
        self
    }

    pub fn level_for(&self, region: &str) -> DemandLevel {
        self.regional.get(region).copied().unwrap_or(self.default)
    }
}

/// Demand rules keyed by (commodity, season)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandPatterns {
    rules: HashMap<(Commodity, Season), DemandRule>,
}

impl DemandPatterns {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, commodity: Commodity, season: Season, rule: DemandRule) -> Self {
        self.rules.insert((commodity, season), rule);
        self
    }

    /// Expected demand; Medium when no rule covers the pair
    pub fn infer(&self, commodity: Commodity, season: Season, region: &str) -> DemandLevel {
        self.rules
            .get(&(commodity, season))
            .map(|rule| rule.level_for(region))
            .unwrap_or(DemandLevel::Medium)
    }

    /// Patterns observed in Indian mandi markets for the supported crops
    pub fn standard() -> Self {
        use Commodity::*;
        use DemandLevel::*;
        use Season::*;

        Self::empty()
            .with_rule(
                Banana,
                Kharif,
                DemandRule::new(Medium)
                    .with_region("Maharashtra", High)
                    .with_region("Karnataka", High),
            )
            .with_rule(
                Banana,
                Rabi,
                DemandRule::new(Low)
                    .with_region("Uttar Pradesh", Medium)
                    .with_region("Punjab", Medium),
            )
            .with_rule(
                Banana,
                Zaid,
                DemandRule::new(High)
                    .with_region("Gujarat", VeryHigh)
                    .with_region("Maharashtra", High),
            )
            .with_rule(
                Coconut,
                Kharif,
                DemandRule::new(Medium)
                    .with_region("Karnataka", High)
                    .with_region("Maharashtra", High),
            )
            .with_rule(
                Coconut,
                Rabi,
                DemandRule::new(Low)
                    .with_region("Karnataka", Medium)
                    .with_region("Gujarat", Medium),
            )
            .with_rule(
                Coconut,
                Zaid,
                DemandRule::new(VeryHigh)
                    .with_region("Karnataka", VeryHigh)
                    .with_region("Maharashtra", High),
            )
            .with_rule(
                Rice,
                Kharif,
                DemandRule::new(High)
                    .with_region("Punjab", VeryHigh)
                    .with_region("Uttar Pradesh", VeryHigh),
            )
            .with_rule(
                Rice,
                Rabi,
                DemandRule::new(Medium)
                    .with_region("West Bengal", High)
                    .with_region("Odisha", High),
            )
            .with_rule(
                Rice,
                Zaid,
                DemandRule::new(Low)
                    .with_region("Tamil Nadu", Medium)
                    .with_region("Karnataka", Medium),
            )
            .with_rule(
                Wheat,
                Kharif,
                DemandRule::new(Low)
                    .with_region("Madhya Pradesh", Medium)
                    .with_region("Uttar Pradesh", Medium),
            )
            .with_rule(
                Wheat,
                Rabi,
                DemandRule::new(VeryHigh)
                    .with_region("Punjab", VeryHigh)
                    .with_region("Haryana", VeryHigh),
            )
            .with_rule(
                Wheat,
                Zaid,
                DemandRule::new(Low)
                    .with_region("Uttar Pradesh", Medium)
                    .with_region("Bihar", Medium),
            )
    }
}
