//! Season and demand inference integration tests

use proptest::prelude::*;
use shared::{Commodity, DemandLevel, DemandPatterns, PredictionEngine, Season, SeasonCalendar};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_northern_calendar() {
        let calendar = SeasonCalendar::default();
        assert_eq!(calendar.infer("Punjab", 7), Season::Kharif);
        assert_eq!(calendar.infer("Punjab", 10), Season::Kharif);
        assert_eq!(calendar.infer("Punjab", 11), Season::Rabi);
        assert_eq!(calendar.infer("Punjab", 3), Season::Rabi);
        assert_eq!(calendar.infer("Punjab", 5), Season::Zaid);
    }

    /// Western regions have no Rabi window
    #[test]
    fn test_western_calendar_has_no_rabi() {
        let engine = PredictionEngine::standard();
        assert_eq!(engine.infer_season("Maharashtra", 6).unwrap(), Season::Kharif);
        for month in [10, 11, 12, 1, 2] {
            assert_eq!(engine.infer_season("Maharashtra", month).unwrap(), Season::Zaid);
        }
        assert_eq!(engine.infer_season("Gujarat", 1).unwrap(), Season::Zaid);
        assert_eq!(engine.infer_season("Karnataka", 3).unwrap(), Season::Zaid);
    }

    #[test]
    fn test_engine_demand_inference() {
        let engine = PredictionEngine::standard();
        assert_eq!(
            engine.infer_demand(Commodity::Coconut, Season::Zaid, "Kerala"),
            DemandLevel::VeryHigh
        );
        assert_eq!(
            engine.infer_demand(Commodity::Rice, Season::Rabi, "Odisha"),
            DemandLevel::High
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every valid month maps to a season for any region
        #[test]
        fn prop_every_month_has_a_season(month in 1u32..=12u32, region in "[A-Za-z ]{0,20}") {
            let engine = PredictionEngine::standard();
            prop_assert!(engine.infer_season(&region, month).is_ok());
        }

        /// Months outside 1-12 are rejected
        #[test]
        fn prop_invalid_month_is_rejected(month in 13u32..=1000u32) {
            let engine = PredictionEngine::standard();
            prop_assert!(engine.infer_season("Punjab", month).is_err());
        }

        /// Inferred demand is always one of the four levels, Medium without rules
        #[test]
        fn prop_empty_patterns_infer_medium(month in 1u32..=12u32) {
            let season = SeasonCalendar::default().infer("Punjab", month);
            let demand = DemandPatterns::empty().infer(Commodity::Rice, season, "Punjab");
            prop_assert_eq!(demand, DemandLevel::Medium);
        }
    }
}
