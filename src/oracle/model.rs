//! Deterministic model oracles for demos and testing.

use super::{ExtractorOracles, SecurityParams};

/// Admissible first-stage input sizes in the model: multiples of 64, plus one.
const SET_STRIDE: usize = 64;

/// A deterministic, contract-satisfying model of the extractor oracles.
///
/// The real oracles encode the combinatorics of the two-source and
/// seeded extractor constructions; this model only reproduces their
/// interface contracts (monotonicity, idempotence, non-increasing
/// epsilon) with coarse closed-form stand-ins. Suitable for wiring
/// tests and the demo binary, NOT for sizing a production extraction
/// run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOracles;

impl ModelOracles {
    pub fn new() -> Self {
        Self
    }
}

impl ExtractorOracles for ModelOracles {
    fn nearest_set_size(&self, requested: usize) -> usize {
        // Largest multiple of the stride at or below the request.
        requested - (requested % SET_STRIDE)
    }

    fn entropy_rate(&self, bias: f64, num_bits: usize, rate_sv: f64) -> f64 {
        // Bias eats into the per-bit rate; small batches pay a
        // finite-size penalty.
        let finite_size_penalty = 1.0 / (num_bits.max(1) as f64).sqrt();
        ((1.0 - 2.0 * bias.max(0.0).sqrt()) * rate_sv - finite_size_penalty).clamp(0.01, 1.0)
    }

    fn output_size(
        &self,
        input_bits: usize,
        rate: f64,
        rate_sv: f64,
        epsilon: f64,
        quantum_proof: bool,
    ) -> usize {
        let yield_fraction = if quantum_proof { 0.35 } else { 0.7 };
        let gross = input_bits as f64 * rate * rate_sv * yield_fraction;
        // Tighter security targets cost a fixed slack per epsilon bit.
        let slack = (epsilon.log2().abs() * 4.0) as usize;
        (gross as usize).saturating_sub(slack)
    }

    fn security_parameters(
        &self,
        input_bits: usize,
        _rate_sv: f64,
        _max_steps: usize,
        cursor: usize,
    ) -> SecurityParams {
        // Each cursor step buys log2(input) more bits of security.
        let bits_per_step = input_bits.max(256).ilog2();
        SecurityParams {
            multiplier: cursor as u32 + 2,
            epsilon: 2.0_f64.powi(-((cursor as i32 + 1) * bits_per_step as i32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_size_idempotent_on_own_output() {
        let oracles = ModelOracles::new();

        for x in [65usize, 100, 1000, 4096, 99_999] {
            let n = oracles.nearest_set_size(x - 1) + 1;
            assert_eq!(oracles.nearest_set_size(n - 1) + 1, n, "x = {}", x);
            assert!(n <= x);
        }
    }

    #[test]
    fn test_set_size_non_decreasing() {
        let oracles = ModelOracles::new();

        let mut prev = 0;
        for x in 1..1000 {
            let n = oracles.nearest_set_size(x);
            assert!(n >= prev);
            prev = n;
        }
    }

    #[test]
    fn test_entropy_rate_in_domain() {
        let oracles = ModelOracles::new();

        for bias in [0.0, 0.03125, 0.125] {
            let rate = oracles.entropy_rate(bias, 4096, 0.95);
            assert!(rate > 0.0 && rate <= 1.0, "bias = {}", bias);
        }
    }

    #[test]
    fn test_output_size_monotonic() {
        let oracles = ModelOracles::new();

        let small = oracles.output_size(1024, 0.5, 0.95, 1e-30, false);
        let bigger_input = oracles.output_size(2048, 0.5, 0.95, 1e-30, false);
        let bigger_rate = oracles.output_size(1024, 0.8, 0.95, 1e-30, false);

        assert!(bigger_input >= small);
        assert!(bigger_rate >= small);
    }

    #[test]
    fn test_quantum_proof_reduces_output() {
        let oracles = ModelOracles::new();

        let classical = oracles.output_size(4096, 0.6, 0.95, 1e-30, false);
        let quantum = oracles.output_size(4096, 0.6, 0.95, 1e-30, true);

        assert!(quantum < classical);
    }

    #[test]
    fn test_security_epsilon_non_increasing() {
        let oracles = ModelOracles::new();

        let mut prev = f64::INFINITY;
        for cursor in 0..20 {
            let params = oracles.security_parameters(1152, 0.95, 20, cursor);
            assert!(params.multiplier > 0);
            assert!(params.epsilon <= prev);
            prev = params.epsilon;
        }
    }
}
