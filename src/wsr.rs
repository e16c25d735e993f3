//! Weak source randomness (WSR) generation.
//!
//! The first-stage extractor consumes a fresh weak random string as its
//! second source. Generation is a pluggable capability: callers may
//! supply their own generator (hardware entropy, a remote service), and
//! its failures propagate unmodified through the planner. The built-in
//! generator draws from a ChaCha20 stream seeded from the OS.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors reported by a weak-source generator.
#[derive(Debug, Error)]
pub enum WsrError {
    /// The underlying source could not produce bits at all.
    #[error("weak source unavailable: {0}")]
    SourceUnavailable(String),
    /// The source returned fewer bits than requested.
    #[error("weak source produced {got} bits, requested {requested}")]
    ShortRead {
        /// Bits the caller asked for.
        requested: usize,
        /// Bits the source actually delivered.
        got: usize,
    },
}

/// A weak-source generator: bit count in, that many 0/1 bits out.
///
/// May be non-deterministic and may block or fail independently of the
/// planner's own logic.
pub type WsrGenerator = Arc<dyn Fn(usize) -> Result<Vec<u8>, WsrError> + Send + Sync>;

fn bits_from_rng(rng: &mut ChaCha20Rng, num_bits: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; num_bits.div_ceil(8)];
    rng.fill_bytes(&mut bytes);

    (0..num_bits)
        .map(|i| (bytes[i / 8] >> (7 - i % 8)) & 1)
        .collect()
}

/// Creates the built-in WSR generator, seeded once from OS entropy.
///
/// Each invocation continues the same ChaCha20 stream, so successive
/// requests yield independent strings.
pub fn os_wsr_generator() -> WsrGenerator {
    let mut seed = [0u8; 32];
    rand_core::OsRng.fill_bytes(&mut seed);
    let rng = Mutex::new(ChaCha20Rng::from_seed(seed));

    Arc::new(move |num_bits| {
        let mut rng = rng
            .lock()
            .map_err(|_| WsrError::SourceUnavailable("generator state poisoned".into()))?;
        Ok(bits_from_rng(&mut rng, num_bits))
    })
}

/// Creates a deterministic WSR generator from a fixed seed.
///
/// Intended for tests and reproducible demos; never use a fixed seed
/// for production extraction.
pub fn seeded_wsr_generator(seed: [u8; 32]) -> WsrGenerator {
    let rng = Mutex::new(ChaCha20Rng::from_seed(seed));

    Arc::new(move |num_bits| {
        let mut rng = rng
            .lock()
            .map_err(|_| WsrError::SourceUnavailable("generator state poisoned".into()))?;
        Ok(bits_from_rng(&mut rng, num_bits))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length_and_binary_values() {
        let generate = os_wsr_generator();

        for n in [0usize, 1, 7, 8, 9, 1000] {
            let bits = generate(n).unwrap();
            assert_eq!(bits.len(), n);
            assert!(bits.iter().all(|&b| b <= 1));
        }
    }

    #[test]
    fn test_seeded_generator_deterministic() {
        let a = seeded_wsr_generator([7u8; 32]);
        let b = seeded_wsr_generator([7u8; 32]);

        assert_eq!(a(256).unwrap(), b(256).unwrap());
    }

    #[test]
    fn test_stream_advances_between_calls() {
        let generate = seeded_wsr_generator([7u8; 32]);

        let first = generate(256).unwrap();
        let second = generate(256).unwrap();
        assert_ne!(first, second);
    }
}
