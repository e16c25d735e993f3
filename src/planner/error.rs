//! Planner failure kinds.

use crate::wsr::WsrError;
use thiserror::Error;

/// Terminal failures of the budget-planning pipeline.
///
/// None of these are retryable by the planner itself; the caller must
/// change its inputs (larger sample, relaxed security parameters, a
/// different policy) and resubmit.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Observed quantum correlation below the required bound. Rerun
    /// with a larger sample size or a different source.
    #[error("observed correlator {observed} is lower than expected value {expected}")]
    InsufficientCorrelation {
        /// Correlator measured from the sampling batch.
        observed: f64,
        /// Lower bound the caller asserted.
        expected: f64,
    },

    /// Privacy amplification requested without a trusted backend.
    #[error("cannot perform privacy amplification using an untrusted backend")]
    InvalidConfiguration,

    /// The set-size oracle broke its idempotence contract. A defect in
    /// the oracle, not a recoverable condition.
    #[error("set-size oracle is not idempotent on first-stage input size {input_bits}")]
    InternalInvariantViolation {
        /// First-stage input size on which the oracle contradicted itself.
        input_bits: usize,
    },

    /// First-stage output below the usability floor. Reduce security
    /// parameters or increase the sample size.
    #[error("first-stage output of {output_bits} bits is below the {floor}-bit floor")]
    InsufficientOutput {
        /// Output length the oracle reported.
        output_bits: usize,
        /// Minimum useful output length.
        floor: usize,
    },

    /// Second-stage input exceeds the extractor's processing cap.
    #[error("second-stage input of {input_bits} bits exceeds the cap of {cap}")]
    InputTooLarge {
        /// Admissible seed size derived from the first-stage output.
        input_bits: usize,
        /// Processing cap of the second-stage extractor.
        cap: usize,
    },

    /// Bounded search exhausted without meeting the security tolerance.
    #[error("no admissible second-stage parameters within {attempts} search steps")]
    InvalidSecurityParameters {
        /// Search steps spent before giving up.
        attempts: usize,
    },

    /// Weak-source generator failure, propagated unmodified.
    #[error(transparent)]
    WeakSource(#[from] WsrError),
}
