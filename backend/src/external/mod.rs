//! External API integrations

pub mod market;

pub use market::MarketClient;
