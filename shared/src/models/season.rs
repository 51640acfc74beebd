//! Season inference from region and calendar month

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Season;

/// Inclusive range of months (1-12). A range whose start is after its end
/// wraps over the year boundary, e.g. November to March.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: u32,
    pub end: u32,
}

impl MonthRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, month: u32) -> bool {
        if self.start <= self.end {
            month >= self.start && month <= self.end
        } else {
            month >= self.start || month <= self.end
        }
    }
}

/// Kharif and Rabi windows for a region; every other month is Zaid.
/// A rule without a Rabi window never yields Rabi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRule {
    pub kharif: MonthRange,
    pub rabi: Option<MonthRange>,
}

impl SeasonRule {
    /// Northern plains: Kharif July-October, Rabi November-March
    pub const NORTHERN: SeasonRule = SeasonRule {
        kharif: MonthRange::new(7, 10),
        rabi: Some(MonthRange::new(11, 3)),
    };

    /// Western and southern states: Kharif June-September. The published
    /// market calendar has no Rabi window here, so October-May is Zaid.
    pub const WESTERN: SeasonRule = SeasonRule {
        kharif: MonthRange::new(6, 9),
        rabi: None,
    };

    pub fn classify(&self, month: u32) -> Season {
        if self.kharif.contains(month) {
            Season::Kharif
        } else if self.rabi.is_some_and(|rabi| rabi.contains(month)) {
            Season::Rabi
        } else {
            Season::Zaid
        }
    }
}

/// Region-specific season rules with a fallback for unlisted regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    default_rule: SeasonRule,
    regions: HashMap<String, SeasonRule>,
}

impl SeasonCalendar {
    pub fn new(default_rule: SeasonRule) -> Self {
        Self {
            default_rule,
            regions: HashMap::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>, rule: SeasonRule) -> Self {
        self.regions.insert(region.into(), rule);
        self
    }

    pub fn rule_for(&self, region: &str) -> &SeasonRule {
        self.regions.get(region).unwrap_or(&self.default_rule)
    }

    /// Season for a region in the given month (1-12)
    pub fn infer(&self, region: &str, month: u32) -> Season {
        self.rule_for(region).classify(month)
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        let northern = [
            "Punjab",
            "Haryana",
            "Uttar Pradesh",
            "Rajasthan",
            "Madhya Pradesh",
        ];
        let western = ["Maharashtra", "Gujarat", "Karnataka"];

        let calendar = northern
            .into_iter()
            .fold(SeasonCalendar::new(SeasonRule::NORTHERN), |cal, region| {
                cal.with_region(region, SeasonRule::NORTHERN)
            });
        western
            .into_iter()
            .fold(calendar, |cal, region| cal.with_region(region, SeasonRule::WESTERN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_range() {
        let range = MonthRange::new(11, 3);
        assert!(range.contains(11));
        assert!(range.contains(12));
        assert!(range.contains(1));
        assert!(range.contains(3));
        assert!(!range.contains(4));
        assert!(!range.contains(10));
    }

    #[test]
    fn test_northern_region_seasons() {
        let calendar = SeasonCalendar::default();
        assert_eq!(calendar.infer("Punjab", 7), Season::Kharif);
        assert_eq!(calendar.infer("Punjab", 10), Season::Kharif);
        assert_eq!(calendar.infer("Punjab", 11), Season::Rabi);
        assert_eq!(calendar.infer("Punjab", 2), Season::Rabi);
        assert_eq!(calendar.infer("Punjab", 4), Season::Zaid);
        assert_eq!(calendar.infer("Punjab", 6), Season::Zaid);
    }

    #[test]
    fn test_western_region_seasons() {
        let calendar = SeasonCalendar::default();
        assert_eq!(calendar.infer("Maharashtra", 6), Season::Kharif);
        assert_eq!(calendar.infer("Gujarat", 9), Season::Kharif);
        assert_eq!(calendar.infer("Maharashtra", 3), Season::Zaid);
        assert_eq!(calendar.infer("Maharashtra", 5), Season::Zaid);
    }

    #[test]
    fn test_western_winter_months_are_zaid() {
        let calendar = SeasonCalendar::default();
        for region in ["Maharashtra", "Gujarat", "Karnataka"] {
            for month in [10, 11, 12, 1, 2] {
                assert_eq!(calendar.infer(region, month), Season::Zaid);
            }
        }
    }

    #[test]
    fn test_unlisted_region_uses_default_rule() {
        let calendar = SeasonCalendar::default();
        for month in 1..=12 {
            assert_eq!(
                calendar.infer("Kerala", month),
                SeasonRule::NORTHERN.classify(month)
            );
        }
    }

    #[test]
    fn test_every_month_has_a_season() {
        let calendar = SeasonCalendar::default();
        let zaid_months: Vec<u32> = (1..=12)
            .filter(|m| calendar.infer("Haryana", *m) == Season::Zaid)
            .collect();
        assert_eq!(zaid_months, vec![4, 5, 6]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            /// A wrapping range holds exactly the months its gap does not
            #[test]
            fn prop_wrapping_range_complements_gap(start in 3u32..=12u32, end in 1u32..=10u32, month in 1u32..=12u32) {
                prop_assume!(start > end + 1);
                let wrapping = MonthRange::new(start, end);
                let gap = MonthRange::new(end + 1, start - 1);
                prop_assert_ne!(wrapping.contains(month), gap.contains(month));
            }

            /// Western regions never infer Rabi
            #[test]
            fn prop_western_rule_has_no_rabi(month in 1u32..=12u32) {
                prop_assert_ne!(SeasonRule::WESTERN.classify(month), Season::Rabi);
            }
        }
    }
}
