//! Business logic services for the HarvestHub price prediction service

pub mod market;
pub mod prediction;

pub use market::MarketService;
pub use prediction::PredictionService;
