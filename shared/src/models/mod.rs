//! Domain models for the HarvestHub price predictor

mod demand;
mod market;
mod prediction;
mod season;
mod yield_quality;

pub use demand::*;
pub use market::*;
pub use prediction::*;
pub use season::*;
pub use yield_quality::*;
