//! Extractor oracle contracts.
//!
//! The real two-source and seeded extractor constructions live in an
//! external service; this crate only needs four size/rate oracles from
//! them. They are modeled as one injectable trait so tests can
//! substitute deterministic stubs without reimplementing extractor
//! mathematics.

mod model;

pub use model::ModelOracles;

/// Candidate second-stage parameters returned by the security oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityParams {
    /// Seed-expansion multiplier for the seeded extractor.
    pub multiplier: u32,
    /// Distance to uniformity achieved with this multiplier.
    pub epsilon: f64,
}

/// Size and rate oracles for the two extraction stages.
///
/// Contracts (violations are caller-visible defects, not recoverable
/// conditions):
///
/// - [`nearest_set_size`](Self::nearest_set_size) is non-decreasing and
///   idempotent on its own output: for any valid `x`,
///   `nearest_set_size(nearest_set_size(x - 1) + 1 - 1) + 1
///   == nearest_set_size(x - 1) + 1`.
/// - [`entropy_rate`](Self::entropy_rate) returns a rate in `(0, 1]`.
/// - [`output_size`](Self::output_size) is monotonic non-decreasing in
///   input size and rate.
/// - [`security_parameters`](Self::security_parameters) returns a
///   positive multiplier and an achieved epsilon that is non-increasing
///   as the cursor advances, up to `max_steps`.
pub trait ExtractorOracles {
    /// Returns the nearest admissible first-stage input size at or
    /// below `requested`, per the extractor's combinatorial construction.
    fn nearest_set_size(&self, requested: usize) -> usize;

    /// Estimates the min-entropy rate per bit for a batch with the
    /// given losing-probability bias and weak-source rate.
    fn entropy_rate(&self, bias: f64, num_bits: usize, rate_sv: f64) -> f64;

    /// Returns the achievable first-stage output length.
    fn output_size(
        &self,
        input_bits: usize,
        rate: f64,
        rate_sv: f64,
        epsilon: f64,
        quantum_proof: bool,
    ) -> usize;

    /// Returns candidate second-stage parameters at the given search cursor.
    fn security_parameters(
        &self,
        input_bits: usize,
        rate_sv: f64,
        max_steps: usize,
        cursor: usize,
    ) -> SecurityParams;
}
