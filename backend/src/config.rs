//! Configuration management for the HarvestHub price prediction service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HARVESTHUB__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{CoreResult, MultiplierTable, PricingConfig};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where market snapshots come from
    pub market: MarketConfig,

    /// Overrides for the canonical multiplier tables
    #[serde(default)]
    pub pricing: PricingOverrides,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Market data source
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarketSourceKind {
    /// Built-in snapshot of the supported commodities
    Builtin,
    /// Remote forecasting service
    Upstream,
}

impl MarketSourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            MarketSourceKind::Builtin => "builtin",
            MarketSourceKind::Upstream => "upstream",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    pub source: MarketSourceKind,

    /// Base URL of the forecasting service, required for `upstream`
    #[serde(default)]
    pub upstream_url: Option<String>,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

/// Multiplier entries merged over the canonical tables
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PricingOverrides {
    #[serde(default)]
    pub regions: MultiplierTable,
    #[serde(default)]
    pub seasons: MultiplierTable,
    #[serde(default)]
    pub demand: MultiplierTable,
    #[serde(default)]
    pub soils: MultiplierTable,
    #[serde(default)]
    pub irrigation: MultiplierTable,
}

impl PricingOverrides {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
            && self.seasons.is_empty()
            && self.demand.is_empty()
            && self.soils.is_empty()
            && self.irrigation.is_empty()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("HARVESTHUB__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("market.source", "builtin")?
            .set_default("market.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HARVESTHUB__ prefix)
            .add_source(
                Environment::with_prefix("HARVESTHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.market.source == MarketSourceKind::Upstream && self.market.upstream_url.is_none() {
            return Err(ConfigError::Message(
                "market.upstream_url is required when market.source is upstream".to_string(),
            ));
        }
        self.pricing_config()
            .map(|_| ())
            .map_err(|e| ConfigError::Message(e.to_string()))
    }

    /// Canonical multiplier tables with the configured overrides applied
    pub fn pricing_config(&self) -> CoreResult<PricingConfig> {
        let mut pricing = PricingConfig::canonical();
        pricing.regions.merge(&self.pricing.regions)?;
        pricing.seasons.merge(&self.pricing.seasons)?;
        pricing.demand.merge(&self.pricing.demand)?;
        pricing.soils.merge(&self.pricing.soils)?;
        pricing.irrigation.merge(&self.pricing.irrigation)?;
        pricing.validate()?;
        Ok(pricing)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            market: MarketConfig::default(),
            pricing: PricingOverrides::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            source: MarketSourceKind::Builtin,
            upstream_url: None,
            timeout_secs: 10,
        }
    }
}
