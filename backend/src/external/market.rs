//! Client for the price forecasting service
//!
//! The service answers `POST /api/predict` with the market snapshot for one
//! commodity.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{Commodity, MarketIntelligence};

use crate::error::{AppError, AppResult};

/// Forecasting service client
#[derive(Clone)]
pub struct MarketClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    commodity: &'a str,
}

/// Error body returned by the service on failure
#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: String,
}

impl MarketClient {
    /// Create a new MarketClient with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the market snapshot for a commodity
    pub async fn fetch_market(&self, commodity: Commodity) -> AppResult<MarketIntelligence> {
        let url = format!("{}/api/predict", self.base_url);
        tracing::debug!(%commodity, %url, "Requesting market snapshot");

        let response = self
            .client
            .post(&url)
            .json(&PredictRequest {
                commodity: commodity.name(),
            })
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Market API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UpstreamError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(AppError::ExternalService(format!(
                "Market API error: {} - {}",
                status, message
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse market response: {}", e))
        })
    }
}
