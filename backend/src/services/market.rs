//! Market snapshot lookup from the built-in catalog or the forecasting service

use std::sync::Arc;
use std::time::Duration;

use shared::{Commodity, MarketCatalog, MarketIntelligence};

use crate::config::{MarketConfig, MarketSourceKind};
use crate::error::{AppError, AppResult};
use crate::external::MarketClient;

#[derive(Clone)]
enum Source {
    Builtin(Arc<MarketCatalog>),
    Upstream(MarketClient),
}

/// Market service resolving commodity snapshots
#[derive(Clone)]
pub struct MarketService {
    source: Source,
}

impl MarketService {
    /// Serve the built-in snapshot
    pub fn builtin() -> Self {
        Self::with_catalog(MarketCatalog::builtin())
    }

    pub fn with_catalog(catalog: MarketCatalog) -> Self {
        Self {
            source: Source::Builtin(Arc::new(catalog)),
        }
    }

    /// Fetch snapshots from the forecasting service
    pub fn upstream(client: MarketClient) -> Self {
        Self {
            source: Source::Upstream(client),
        }
    }

    pub fn from_config(config: &MarketConfig) -> AppResult<Self> {
        match (config.source, config.upstream_url.as_deref()) {
            (MarketSourceKind::Builtin, _) => Ok(Self::builtin()),
            (MarketSourceKind::Upstream, Some(url)) => {
                let client = MarketClient::new(url, Duration::from_secs(config.timeout_secs))?;
                Ok(Self::upstream(client))
            }
            (MarketSourceKind::Upstream, None) => Err(AppError::Configuration(
                "market.upstream_url is not set".to_string(),
            )),
        }
    }

    pub fn source_name(&self) -> &'static str {
        match &self.source {
            Source::Builtin(_) => MarketSourceKind::Builtin.name(),
            Source::Upstream(_) => MarketSourceKind::Upstream.name(),
        }
    }

    /// Commodities a snapshot can be requested for
    pub fn commodities(&self) -> Vec<Commodity> {
        match &self.source {
            Source::Builtin(catalog) => catalog.commodities(),
            Source::Upstream(_) => Commodity::ALL.to_vec(),
        }
    }

    /// Snapshot for a commodity; `month` fills sections a partial upstream
    /// response leaves out
    pub async fn market(&self, commodity: Commodity, month: u32) -> AppResult<MarketIntelligence> {
        match &self.source {
            Source::Builtin(catalog) => catalog
                .get(commodity)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Market data for {}", commodity))),
            Source::Upstream(client) => {
                let market = client.fetch_market(commodity).await?;
                tracing::info!(%commodity, "Fetched market snapshot from upstream");
                Ok(market.normalized(month))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_market_lookup() {
        let service = MarketService::builtin();
        assert_eq!(service.source_name(), "builtin");
        assert_eq!(service.commodities().len(), 4);
        let market = service.market(Commodity::Rice, 1).await.unwrap();
        assert_eq!(market.commodity, "Rice");
    }

    #[tokio::test]
    async fn test_missing_catalog_entry_is_not_found() {
        let service = MarketService::with_catalog(MarketCatalog::new());
        assert!(service.commodities().is_empty());
        let err = service.market(Commodity::Wheat, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_from_config_selects_source() {
        let mut config = MarketConfig::default();
        assert_eq!(MarketService::from_config(&config).unwrap().source_name(), "builtin");

        config.source = MarketSourceKind::Upstream;
        assert!(MarketService::from_config(&config).is_err());

        config.upstream_url = Some("http://localhost:5000".to_string());
        assert_eq!(MarketService::from_config(&config).unwrap().source_name(), "upstream");
    }
}
