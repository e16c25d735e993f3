//! Extraction policy and budget planning.
//!
//! This module turns a [`SamplingResult`](crate::sampling::SamplingResult)
//! plus a declared trust/privacy policy into the exact parameter bundle
//! the downstream two-stage extractor service expects.

mod budget;
mod config;
mod error;
mod params;

pub use budget::{BudgetPlanner, MIN_EXT1_OUTPUT_BITS};
pub use config::{ConfigError, ExtractionConfig, DEFAULT_EPSILON_SEC, DEFAULT_RATE_SV};
pub use error::PlannerError;
pub use params::ExtractorParams;
