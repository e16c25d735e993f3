//! Extractor parameter bundle.

use crate::wsr::WsrGenerator;

/// The complete parameter bundle for a two-stage extraction run.
///
/// This is the exact contract expected by the downstream extractor
/// service. On success `ext1_output_bits >= 50`; the second-stage
/// fields are either both zero (stage disabled) or both positive.
/// The bundle carries no back-reference to the sampling result.
#[derive(Clone)]
pub struct ExtractorParams {
    /// Input size of the first-stage (two-source) extractor, in bits.
    pub ext1_input_bits: usize,
    /// Achievable output length of the first stage, in bits.
    pub ext1_output_bits: usize,
    /// Raw sampled bits, truncated to the admissible size and packed.
    pub ext1_raw_bytes: Vec<u8>,
    /// Fresh weak random string for the first stage's second source, packed.
    pub ext1_seed_bytes: Vec<u8>,
    /// Seed size of the second-stage (seeded) extractor, in bits.
    pub ext2_seed_bits: usize,
    /// Seed-expansion multiplier of the second stage.
    pub ext2_multiplier: u32,
    /// Generator the extractor service uses to draw the second-stage seed.
    pub ext2_generator: WsrGenerator,
}

impl ExtractorParams {
    /// Returns true if the second extraction stage is enabled.
    pub fn second_stage_enabled(&self) -> bool {
        self.ext2_seed_bits > 0
    }
}

impl std::fmt::Debug for ExtractorParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorParams")
            .field("ext1_input_bits", &self.ext1_input_bits)
            .field("ext1_output_bits", &self.ext1_output_bits)
            .field("ext1_raw_bytes", &self.ext1_raw_bytes.len())
            .field("ext1_seed_bytes", &self.ext1_seed_bytes.len())
            .field("ext2_seed_bits", &self.ext2_seed_bits)
            .field("ext2_multiplier", &self.ext2_multiplier)
            .finish_non_exhaustive()
    }
}
