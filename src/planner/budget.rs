//! Extractor budget planning.
//!
//! Translates a measured quantum correlation strength and a declared
//! trust/privacy policy into exact bit-length budgets for the two
//! extraction stages: input truncation to an admissible size, the
//! entropy-rate correction that truncation requires, and a bounded
//! search for the second stage's security multiplier.

use super::config::ExtractionConfig;
use super::error::PlannerError;
use super::params::ExtractorParams;
use crate::formatting;
use crate::oracle::ExtractorOracles;
use crate::sampling::SamplingResult;
use crate::wsr::{self, WsrError, WsrGenerator};

/// Minimum useful first-stage output length, in bits.
pub const MIN_EXT1_OUTPUT_BITS: usize = 50;

/// Maximum input size the second-stage extractor can process, in bits.
const MAX_EXT2_INPUT_BITS: usize = 500_000_000;

/// Fixed-point scale for the complement-rate rounding in the
/// second-stage search budget. Keeps the search step count stable
/// against floating-point representation of `1 - rate_sv`.
const COMPLEMENT_SCALE: f64 = 1e8;

/// Plans extraction budgets from sampling results.
///
/// The planner is a pure computation over its inputs except for one
/// side-effecting call, the weak-source generator; generator failures
/// surface unmodified. Independent calls share no mutable state.
pub struct BudgetPlanner<O> {
    oracles: O,
}

impl<O: ExtractorOracles> BudgetPlanner<O> {
    /// Creates a planner over the given extractor oracles.
    pub fn new(oracles: O) -> Self {
        Self { oracles }
    }

    /// Derives the complete extractor parameter bundle for one batch.
    ///
    /// Runs the linear pipeline: correlator and policy validation, bias
    /// derivation, first-stage sizing with truncation correction, and,
    /// when the policy enables it, the bounded second-stage search.
    /// Fails with a specific [`PlannerError`] rather than returning a
    /// partial bundle.
    pub fn derive_parameters(
        &self,
        result: &SamplingResult,
        config: &ExtractionConfig,
    ) -> Result<ExtractorParams, PlannerError> {
        let observed = result.statistics().correlator;
        let expected = config.expected_correlator.unwrap_or(observed);

        if observed < expected {
            return Err(PlannerError::InsufficientCorrelation { observed, expected });
        }

        if config.privacy && !config.trusted_backend {
            return Err(PlannerError::InvalidConfiguration);
        }

        let generate_wsr: WsrGenerator = config
            .wsr_generator
            .clone()
            .unwrap_or_else(wsr::os_wsr_generator);

        // The correlator domain [2, 4] maps onto a losing-probability
        // domain [0.125, 0]; this is the bias the extractors assume.
        let losing_prob = (4.0 - expected) / 16.0;

        let bits = result.raw_bits();
        let num_bits = bits.len();
        if num_bits == 0 {
            return Err(PlannerError::InsufficientOutput {
                output_bits: 0,
                floor: MIN_EXT1_OUTPUT_BITS,
            });
        }
        let rate_bt = self
            .oracles
            .entropy_rate(losing_prob, num_bits, config.rate_sv);

        // First stage: the overall security budget splits evenly
        // between the two stages.
        let epsilon_1 = config.epsilon_sec / 2.0;
        let n = self.oracles.nearest_set_size(num_bits - 1) + 1;
        let dropped = num_bits
            .checked_sub(n)
            .ok_or(PlannerError::InternalInvariantViolation { input_bits: n })?;

        // Dropped bits are assumed to carry zero entropy, so the
        // batch's entropy budget is redistributed over the kept bits.
        let rate_bt =
            (num_bits as f64 * rate_bt - dropped as f64) / (num_bits - dropped) as f64;
        let bits = &bits[..n];

        if self.oracles.nearest_set_size(n - 1) + 1 != n {
            return Err(PlannerError::InternalInvariantViolation { input_bits: n });
        }

        let output_len =
            self.oracles
                .output_size(n, rate_bt, config.rate_sv, epsilon_1, config.quantum_proof);
        if output_len < MIN_EXT1_OUTPUT_BITS {
            return Err(PlannerError::InsufficientOutput {
                output_bits: output_len,
                floor: MIN_EXT1_OUTPUT_BITS,
            });
        }

        tracing::debug!(
            num_bits,
            input_bits = n,
            dropped,
            corrected_rate = rate_bt,
            output_bits = output_len,
            "First stage sized"
        );

        let raw_bytes = formatting::pack_bits(bits);
        let seed_bits = generate_wsr(n)?;
        if seed_bits.len() != n {
            return Err(WsrError::ShortRead {
                requested: n,
                got: seed_bits.len(),
            }
            .into());
        }
        let seed_bytes = formatting::pack_bits(&seed_bits);

        // Second stage only runs for trusted, non-private extraction;
        // otherwise both fields stay at the disabled sentinel.
        let (ext2_seed_bits, ext2_multiplier) = if config.trusted_backend && !config.privacy {
            self.size_second_stage(output_len, config.rate_sv, epsilon_1)?
        } else {
            (0, 0)
        };

        tracing::info!(
            ext1_input_bits = n,
            ext1_output_bits = output_len,
            ext2_seed_bits,
            ext2_multiplier,
            "Extractor parameters derived"
        );

        Ok(ExtractorParams {
            ext1_input_bits: n,
            ext1_output_bits: output_len,
            ext1_raw_bytes: raw_bytes,
            ext1_seed_bytes: seed_bytes,
            ext2_seed_bits,
            ext2_multiplier,
            ext2_generator: generate_wsr,
        })
    }

    /// Sizes the seeded second stage via a bounded cursor search.
    ///
    /// The step budget is fixed up front from the weak-source
    /// complement rate, so termination is structural: at most
    /// `max_steps` oracle calls, then failure.
    fn size_second_stage(
        &self,
        ext1_output_bits: usize,
        rate_sv: f64,
        tolerance: f64,
    ) -> Result<(usize, u32), PlannerError> {
        let complement = ((1.0 - rate_sv) * COMPLEMENT_SCALE).round() / COMPLEMENT_SCALE;
        if complement <= 0.0 {
            // rate_sv within rounding distance of 1 leaves no search
            // budget at all.
            return Err(PlannerError::InvalidSecurityParameters { attempts: 0 });
        }
        let max_steps = (1.0 / complement).floor() as usize;

        let seed_bits = self.oracles.nearest_set_size(ext1_output_bits);
        if seed_bits == 0 {
            // First-stage output sits below the smallest admissible
            // seed size; there is nothing to search over.
            return Err(PlannerError::InvalidSecurityParameters { attempts: 0 });
        }
        if seed_bits > MAX_EXT2_INPUT_BITS {
            return Err(PlannerError::InputTooLarge {
                input_bits: seed_bits,
                cap: MAX_EXT2_INPUT_BITS,
            });
        }

        for cursor in 0..max_steps {
            let candidate = self
                .oracles
                .security_parameters(seed_bits, rate_sv, max_steps, cursor);
            if candidate.epsilon <= tolerance {
                tracing::debug!(
                    seed_bits,
                    multiplier = candidate.multiplier,
                    achieved_epsilon = candidate.epsilon,
                    cursor,
                    "Second stage sized"
                );
                return Ok((seed_bits, candidate.multiplier));
            }
        }

        Err(PlannerError::InvalidSecurityParameters { attempts: max_steps })
    }
}
