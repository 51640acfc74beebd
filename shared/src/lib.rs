//! Shared types and prediction logic for the HarvestHub crop price predictor
//!
//! This crate contains the pure prediction core shared between the backend,
//! the browser build (via WASM), and other components of the system.

pub mod catalog;
pub mod error;
pub mod forecast;
pub mod models;
pub mod pipeline;
pub mod pricing;
pub mod report;
pub mod signal;
pub mod types;
pub mod validation;

pub use catalog::MarketCatalog;
pub use error::{CoreResult, PredictionError};
pub use forecast::*;
pub use models::*;
pub use pipeline::PredictionEngine;
pub use pricing::*;
pub use report::{render_report, report_file_name, share_message};
pub use signal::*;
pub use types::*;
pub use validation::*;
