//! Prediction service combining market lookup with the prediction engine

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use shared::{
    render_report, validate_prediction_request, MarketIntelligence, PredictionEngine,
    PredictionRequest, PredictionResult,
};
use validator::Validate;

use crate::error::AppResult;
use crate::services::MarketService;

/// Prediction for a request together with the market it was computed from
#[derive(Debug)]
pub struct Prediction {
    pub result: PredictionResult,
    pub market: MarketIntelligence,
}

/// Prediction service
#[derive(Clone)]
pub struct PredictionService {
    engine: Arc<PredictionEngine>,
    market: MarketService,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(engine: Arc<PredictionEngine>, market: MarketService) -> Self {
        Self { engine, market }
    }

    /// Predict the price for a request as of `now`
    pub async fn predict_at(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> AppResult<Prediction> {
        request.validate()?;
        let commodity = validate_prediction_request(request)?;

        let month = request.month.unwrap_or_else(|| now.month());
        let market = self.market.market(commodity, month).await?;
        let result = self.engine.predict(request, &market, now.month())?;

        tracing::info!(
            %commodity,
            region = %result.region,
            season = %result.season,
            demand = %result.demand,
            price = %result.predicted_price,
            "Prediction computed"
        );

        Ok(Prediction { result, market })
    }

    pub async fn predict(&self, request: &PredictionRequest) -> AppResult<Prediction> {
        self.predict_at(request, Utc::now()).await
    }

    /// Plain-text report for a request
    pub async fn report(&self, request: &PredictionRequest) -> AppResult<String> {
        let now = Utc::now();
        let prediction = self.predict_at(request, now).await?;
        Ok(render_report(&prediction.result, &prediction.market, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use shared::Season;

    fn service() -> PredictionService {
        PredictionService::new(Arc::new(PredictionEngine::standard()), MarketService::builtin())
    }

    #[tokio::test]
    async fn test_predict_uses_current_month_for_season() {
        let now = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
        let request = PredictionRequest::new("Banana", "Maharashtra", 50);
        let prediction = service().predict_at(&request, now).await.unwrap();
        assert_eq!(prediction.result.season, Season::Kharif);
        assert_eq!(prediction.result.predicted_price, Decimal::new(285466, 2));
        assert_eq!(prediction.market.commodity, "Banana");
    }

    #[tokio::test]
    async fn test_invalid_yield_is_rejected_before_lookup() {
        let request = PredictionRequest::new("Banana", "Punjab", 0);
        let err = service().predict(&request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_commodity_is_not_found() {
        let request = PredictionRequest::new("Mango", "Punjab", 50);
        let err = service().predict(&request).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_report_mentions_crop() {
        let request = PredictionRequest::new("Coconut", "Karnataka", 45);
        let report = service().report(&request).await.unwrap();
        assert!(report.contains("• Crop: Coconut"));
        assert!(report.contains("• Region: Karnataka"));
    }
}
