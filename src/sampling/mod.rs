//! Sampling results from a Bell-test protocol run.
//!
//! This module owns the immutable record of one sampling batch: the
//! per-round measurement settings, the per-round outcomes, and the Bell
//! statistics derived from them exactly once at ingestion.

mod bell;

pub use bell::{BellError, BellEstimator, BellStatistics, FixedBellEstimator, CLASSICAL_CORRELATOR_BOUND};

use crate::formatting;
use thiserror::Error;

/// Errors that can occur when ingesting a sampling batch.
#[derive(Debug, Error)]
pub enum SamplingError {
    /// Settings and outcomes disagree on how many rounds were run.
    #[error("settings and outcomes differ in round count: {settings} vs {outcomes}")]
    RoundCountMismatch {
        /// Number of per-round setting vectors.
        settings: usize,
        /// Number of per-round outcome vectors.
        outcomes: usize,
    },
    /// Bell-value estimation failure, propagated unmodified.
    #[error(transparent)]
    Bell(#[from] BellError),
}

/// One completed sampling batch with derived Bell statistics.
///
/// `settings` holds the measurement-basis choices fed to each round;
/// `outcomes` holds the 0/1 measurement results, one vector per round.
/// The flattened outcome bits and the Bell statistics are computed at
/// construction and never recomputed. The result is immutable and safe
/// to share read-only across threads.
pub struct SamplingResult {
    settings: Vec<Vec<u8>>,
    outcomes: Vec<Vec<u8>>,
    raw_bits: Vec<u8>,
    stats: BellStatistics,
}

impl SamplingResult {
    /// Ingests a sampling batch, deriving its Bell statistics.
    ///
    /// Fails if the settings and outcomes disagree on the round count,
    /// or if the Bell estimator reports an error.
    pub fn ingest(
        settings: Vec<Vec<u8>>,
        outcomes: Vec<Vec<u8>>,
        estimator: &dyn BellEstimator,
    ) -> Result<Self, SamplingError> {
        if settings.len() != outcomes.len() {
            return Err(SamplingError::RoundCountMismatch {
                settings: settings.len(),
                outcomes: outcomes.len(),
            });
        }

        let stats = estimator.estimate(&settings, &outcomes)?;
        let raw_bits = formatting::flatten_rounds(&outcomes);

        tracing::debug!(
            rounds = settings.len(),
            raw_bits = raw_bits.len(),
            correlator = stats.correlator,
            "Sampling batch ingested"
        );

        Ok(Self {
            settings,
            outcomes,
            raw_bits,
            stats,
        })
    }

    /// Returns the per-round measurement settings.
    pub fn settings(&self) -> &[Vec<u8>] {
        &self.settings
    }

    /// Returns the per-round outcome records.
    pub fn outcomes(&self) -> &[Vec<u8>] {
        &self.outcomes
    }

    /// Returns the flattened outcome bits, in round order.
    pub fn raw_bits(&self) -> &[u8] {
        &self.raw_bits
    }

    /// Returns the number of rounds in the batch.
    pub fn rounds(&self) -> usize {
        self.settings.len()
    }

    /// Returns the Bell statistics derived at ingestion.
    pub fn statistics(&self) -> &BellStatistics {
        &self.stats
    }

    /// Returns the `(losing, winning, correlator)` triple.
    pub fn bell_values(&self) -> (f64, f64, f64) {
        self.stats.as_triple()
    }
}

impl std::fmt::Debug for SamplingResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplingResult")
            .field("rounds", &self.settings.len())
            .field("raw_bits", &self.raw_bits.len())
            .field("correlator", &self.stats.correlator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds(n: usize, width: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| vec![(i % 2) as u8; width]).collect()
    }

    #[test]
    fn test_ingest_valid_batch() {
        let result =
            SamplingResult::ingest(rounds(4, 3), rounds(4, 3), &FixedBellEstimator::new(3.5))
                .unwrap();

        assert_eq!(result.rounds(), 4);
        assert_eq!(result.raw_bits().len(), 12);
        assert_eq!(result.bell_values().2, 3.5);
    }

    #[test]
    fn test_round_count_mismatch() {
        let result =
            SamplingResult::ingest(rounds(4, 3), rounds(3, 3), &FixedBellEstimator::new(3.5));

        assert!(matches!(
            result,
            Err(SamplingError::RoundCountMismatch { settings: 4, outcomes: 3 })
        ));
    }

    #[test]
    fn test_raw_bits_follow_round_order() {
        let outcomes = vec![vec![1, 1], vec![0, 0], vec![1, 0]];
        let result = SamplingResult::ingest(
            vec![vec![0]; 3],
            outcomes,
            &FixedBellEstimator::new(3.0),
        )
        .unwrap();

        assert_eq!(result.raw_bits(), &[1, 1, 0, 0, 1, 0]);
    }
}
