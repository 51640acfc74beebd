//! Validation utilities for the HarvestHub price predictor

use validator::Validate;

use crate::error::{CoreResult, PredictionError};
use crate::models::PredictionRequest;
use crate::types::Commodity;

/// Smallest accepted yield (quintals/hectare)
pub const MIN_YIELD: u32 = 1;
/// Largest accepted yield (quintals/hectare)
pub const MAX_YIELD: u32 = 1000;

// ============================================================================
// Field Validations
// ============================================================================

/// Validate yield is within the accepted range
pub fn validate_yield(yield_per_hectare: u32) -> Result<(), &'static str> {
    if !(MIN_YIELD..=MAX_YIELD).contains(&yield_per_hectare) {
        return Err("Please enter a valid yield between 1 and 1000 quintals/hectare");
    }
    Ok(())
}

/// Validate a calendar month (1-12)
pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a region name is present
pub fn validate_region(region: &str) -> Result<(), &'static str> {
    if region.trim().is_empty() {
        return Err("Region is required");
    }
    Ok(())
}

/// Parse a commodity name, listing the supported ones on failure
pub fn parse_commodity(name: &str) -> CoreResult<Commodity> {
    name.parse::<Commodity>().map_err(|_| {
        let supported: Vec<&str> = Commodity::ALL.iter().map(|c| c.name()).collect();
        PredictionError::UnknownCommodity(format!(
            "{}. Must be one of: {}",
            name.trim(),
            supported.join(", ")
        ))
    })
}

// ============================================================================
// Request Validation
// ============================================================================

/// Validate a prediction request and resolve its commodity
pub fn validate_prediction_request(request: &PredictionRequest) -> CoreResult<Commodity> {
    request
        .validate()
        .map_err(|e| PredictionError::invalid(e.to_string()))?;
    validate_region(&request.region).map_err(PredictionError::invalid)?;
    parse_commodity(&request.commodity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_yield() {
        assert!(validate_yield(1).is_ok());
        assert!(validate_yield(50).is_ok());
        assert!(validate_yield(1000).is_ok());
        assert!(validate_yield(0).is_err());
        assert!(validate_yield(1001).is_err());
    }

    #[test]
    fn test_validate_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_region("Punjab").is_ok());
        assert!(validate_region("   ").is_err());
    }

    #[test]
    fn test_parse_commodity_lists_supported() {
        assert_eq!(parse_commodity("Wheat").unwrap(), Commodity::Wheat);
        match parse_commodity("Maize") {
            Err(PredictionError::UnknownCommodity(msg)) => {
                assert!(msg.contains("Banana, Coconut, Rice, Wheat"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_request_validation() {
        let request = PredictionRequest::new("Rice", "Punjab", 50);
        assert_eq!(validate_prediction_request(&request).unwrap(), Commodity::Rice);

        let request = PredictionRequest::new("Rice", "Punjab", 0);
        assert!(matches!(
            validate_prediction_request(&request),
            Err(PredictionError::InvalidInput(_))
        ));

        let mut request = PredictionRequest::new("Rice", "Punjab", 50);
        request.month = Some(13);
        assert!(validate_prediction_request(&request).is_err());

        let request = PredictionRequest::new("", "Punjab", 50);
        assert!(validate_prediction_request(&request).is_err());

        let request = PredictionRequest::new("Cotton", "Punjab", 50);
        assert!(matches!(
            validate_prediction_request(&request),
            Err(PredictionError::UnknownCommodity(_))
        ));
    }
}
