//! Bellplan — extractor-budget planning for Bell-certified randomness.
//!
//! Turns a batch of physically-sampled random bits from a Bell-test
//! style quantum protocol into the parameter bundle for a two-stage
//! randomness-extraction pipeline: a two-source extractor fed by the
//! raw bits and a weak random string, then a seeded extractor that
//! stretches the near-uniform output.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! settings + outcomes → sampling (Bell statistics)
//!                            ↓
//!                    planner (budget algorithm)
//!                    ↙        ↓         ↘
//!              formatting   oracle      wsr
//! ```
//!
//! Quantum circuit execution, the Bell-value statistics, and the
//! extractor constructions themselves are external collaborators,
//! reached through the [`sampling::BellEstimator`] and
//! [`oracle::ExtractorOracles`] seams.
//!
//! # Example
//!
//! ```no_run
//! use bellplan::{
//!     oracle::ModelOracles,
//!     planner::{BudgetPlanner, ExtractionConfig},
//!     sampling::{FixedBellEstimator, SamplingResult},
//! };
//!
//! let settings = vec![vec![0u8, 1, 1]; 2048];
//! let outcomes = vec![vec![1u8, 0, 1]; 2048];
//!
//! let result =
//!     SamplingResult::ingest(settings, outcomes, &FixedBellEstimator::new(3.5)).unwrap();
//!
//! let planner = BudgetPlanner::new(ModelOracles::new());
//! let params = planner
//!     .derive_parameters(&result, &ExtractionConfig::default())
//!     .unwrap();
//!
//! assert!(params.ext1_output_bits >= 50);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod formatting;
pub mod oracle;
pub mod planner;
pub mod sampling;
pub mod wsr;

// Re-export commonly used types at crate root
pub use oracle::{ExtractorOracles, ModelOracles, SecurityParams};
pub use planner::{BudgetPlanner, ExtractionConfig, ExtractorParams, PlannerError};
pub use sampling::{BellEstimator, BellStatistics, SamplingResult};
pub use wsr::{WsrError, WsrGenerator};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
