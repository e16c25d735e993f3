//! Extraction policy configuration.
//!
//! Declares the caller's trust and security policy for one extraction
//! run: the assumed weak-source quality, the target distance to
//! uniformity, and the trust/privacy flags that decide whether the
//! second extraction stage runs at all.

use crate::wsr::WsrGenerator;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default assumed Santha-Vazirani rate of the weak source.
pub const DEFAULT_RATE_SV: f64 = 0.95;

/// Default target distance to uniformity of the final output.
pub const DEFAULT_EPSILON_SEC: f64 = 1e-30;

/// Policy and security parameters for one extraction run.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Assumed randomness rate of the weak source, in `(0, 1]`.
    #[serde(default = "default_rate_sv")]
    pub rate_sv: f64,
    /// Externally asserted lower bound on the correlator. When absent,
    /// the observed value from the sampling batch is used.
    #[serde(default)]
    pub expected_correlator: Option<f64>,
    /// Target distance to uniformity of the final output string. With
    /// privacy amplification, this is the distance to a uniform and
    /// private string.
    #[serde(default = "default_epsilon_sec")]
    pub epsilon_sec: f64,
    /// Quantum-proof extraction in the Markov model (most conservative)
    /// instead of classical-proof in the standard model. Reduces
    /// generation rates considerably.
    #[serde(default)]
    pub quantum_proof: bool,
    /// Whether the raw bits came from a trusted backend over a secure
    /// channel.
    #[serde(default = "default_true")]
    pub trusted_backend: bool,
    /// Whether to perform privacy amplification.
    #[serde(default)]
    pub privacy: bool,
    /// Weak-source generator override. Defaults to the built-in
    /// OS-seeded generator when absent.
    #[serde(skip)]
    pub wsr_generator: Option<WsrGenerator>,
}

fn default_rate_sv() -> f64 {
    DEFAULT_RATE_SV
}

fn default_epsilon_sec() -> f64 {
    DEFAULT_EPSILON_SEC
}

fn default_true() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            rate_sv: DEFAULT_RATE_SV,
            expected_correlator: None,
            epsilon_sec: DEFAULT_EPSILON_SEC,
            quantum_proof: false,
            trusted_backend: true,
            privacy: false,
            wsr_generator: None,
        }
    }
}

impl ExtractionConfig {
    /// Validates the numeric parameter domains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_sv > 0.0 && self.rate_sv <= 1.0) {
            return Err(ConfigError::InvalidRate(self.rate_sv));
        }
        if !(self.epsilon_sec > 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon_sec));
        }
        Ok(())
    }

    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: ExtractionConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl std::fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("rate_sv", &self.rate_sv)
            .field("expected_correlator", &self.expected_correlator)
            .field("epsilon_sec", &self.epsilon_sec)
            .field("quantum_proof", &self.quantum_proof)
            .field("trusted_backend", &self.trusted_backend)
            .field("privacy", &self.privacy)
            .field("wsr_generator", &self.wsr_generator.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("weak source rate {0} outside (0, 1]")]
    InvalidRate(f64),
    #[error("security distance {0} must be positive")]
    InvalidEpsilon(f64),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_sv, 0.95);
        assert!(config.trusted_backend);
        assert!(!config.privacy);
    }

    #[test]
    fn test_rate_out_of_domain() {
        let config = ExtractionConfig {
            rate_sv: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRate(_))));

        let config = ExtractionConfig {
            rate_sv: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRate(_))));
    }

    #[test]
    fn test_epsilon_must_be_positive() {
        let config = ExtractionConfig {
            epsilon_sec: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn test_toml_defaults_fill_in() {
        let config: ExtractionConfig = toml::from_str("rate_sv = 0.9\nprivacy = true").unwrap();

        assert_eq!(config.rate_sv, 0.9);
        assert!(config.privacy);
        assert_eq!(config.epsilon_sec, DEFAULT_EPSILON_SEC);
        assert!(config.trusted_backend);
        assert!(config.expected_correlator.is_none());
    }
}
