//! HTTP handlers

pub mod health;
pub mod market;
pub mod prediction;

pub use health::health_check;
pub use market::{extrapolate, get_market, infer_season, list_commodities};
pub use prediction::{predict, prediction_report};
