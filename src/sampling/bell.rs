//! Bell statistics and the Bell-value collaborator seam.
//!
//! The statistical Bell-value formula itself lives outside this crate;
//! this module only defines its contract and stores its output. The
//! trait seam allows swapping the real analysis backend for a
//! deterministic stand-in in tests and demos.

use thiserror::Error;

/// Correlator value at or below which no quantum advantage exists.
pub const CLASSICAL_CORRELATOR_BOUND: f64 = 2.0;

/// Bell values derived from one sampling batch.
///
/// Computed exactly once at result ingestion and immutable thereafter.
/// The correlator lives in `[2, 4]` for a quantum-correlated source;
/// values at or below 2 are achievable classically and certify nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BellStatistics {
    /// Probability of losing a round of the Mermin game.
    pub losing_probability: f64,
    /// Probability of winning a round (complement of losing).
    pub winning_probability: f64,
    /// Mermin correlator value.
    pub correlator: f64,
}

impl BellStatistics {
    /// Returns the `(losing, winning, correlator)` triple.
    pub fn as_triple(&self) -> (f64, f64, f64) {
        (
            self.losing_probability,
            self.winning_probability,
            self.correlator,
        )
    }

    /// Returns true if the correlator exceeds the classical bound.
    pub fn is_quantum(&self) -> bool {
        self.correlator > CLASSICAL_CORRELATOR_BOUND
    }
}

/// Errors reported by a Bell-value estimator.
#[derive(Debug, Error)]
pub enum BellError {
    /// The estimator could not derive Bell values from the batch.
    #[error("bell value estimation failed: {0}")]
    EstimationFailed(String),
}

/// Collaborator that derives Bell values from round settings and outcomes.
///
/// Implementations own the statistical formula; this crate only stores
/// and validates the result.
pub trait BellEstimator {
    /// Computes Bell statistics from per-round settings and outcomes.
    fn estimate(&self, settings: &[Vec<u8>], outcomes: &[Vec<u8>]) -> Result<BellStatistics, BellError>;
}

/// Bell estimator that reports a fixed correlator.
///
/// Stands in for the real statistical backend in demos and tests. The
/// losing probability is derived from the correlator through the same
/// algebraic map the planner uses (`losing = (4 - correlator) / 16`), so
/// the reported triple is internally consistent.
#[derive(Debug, Clone, Copy)]
pub struct FixedBellEstimator {
    correlator: f64,
}

impl FixedBellEstimator {
    /// Creates an estimator reporting the given correlator value.
    pub fn new(correlator: f64) -> Self {
        Self { correlator }
    }
}

impl BellEstimator for FixedBellEstimator {
    fn estimate(&self, _settings: &[Vec<u8>], _outcomes: &[Vec<u8>]) -> Result<BellStatistics, BellError> {
        let losing = (4.0 - self.correlator) / 16.0;
        Ok(BellStatistics {
            losing_probability: losing,
            winning_probability: 1.0 - losing,
            correlator: self.correlator,
        })
    }
}
