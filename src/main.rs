//! Bellplan CLI
//!
//! Command-line interface for demonstrating the extractor-budget
//! planner against the deterministic model oracles and a stand-in
//! Bell estimator.

use bellplan::{
    oracle::ModelOracles,
    planner::{BudgetPlanner, ExtractionConfig},
    sampling::{FixedBellEstimator, SamplingResult},
    wsr,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Typical correlator observed on a noiseless simulator backend.
const SIMULATOR_CORRELATOR: f64 = 3.5;

/// Outcome bits per sampling round (three-party Mermin game).
const BITS_PER_ROUND: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "bellplan", version, about = "Extractor-budget planning demo")]
struct Args {
    /// Number of synthetic sampling rounds to generate.
    #[arg(long, default_value_t = 2048)]
    rounds: usize,

    /// Correlator reported by the stand-in Bell estimator.
    #[arg(long, default_value_t = SIMULATOR_CORRELATOR)]
    correlator: f64,

    /// Externally asserted correlator lower bound.
    #[arg(long)]
    expected_correlator: Option<f64>,

    /// Assumed Santha-Vazirani rate of the weak source.
    #[arg(long, default_value_t = bellplan::planner::DEFAULT_RATE_SV)]
    rate_sv: f64,

    /// Target distance to uniformity of the final output.
    #[arg(long, default_value_t = bellplan::planner::DEFAULT_EPSILON_SEC)]
    epsilon: f64,

    /// Use quantum-proof extraction in the Markov model.
    #[arg(long)]
    quantum_proof: bool,

    /// Treat the raw bits as coming from an untrusted backend.
    #[arg(long)]
    untrusted: bool,

    /// Perform privacy amplification.
    #[arg(long)]
    privacy: bool,

    /// Load extraction policy from a TOML file instead of the flags above.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Bellplan v{}", bellplan::VERSION);
    info!("This is a demonstration using model oracles and synthetic outcomes");

    let config = match &args.config {
        Some(path) => match ExtractionConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            let config = ExtractionConfig {
                rate_sv: args.rate_sv,
                expected_correlator: args.expected_correlator,
                epsilon_sec: args.epsilon,
                quantum_proof: args.quantum_proof,
                trusted_backend: !args.untrusted,
                privacy: args.privacy,
                wsr_generator: None,
            };
            if let Err(e) = config.validate() {
                eprintln!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
            config
        }
    };

    // Synthesize a sampling batch. A real deployment would take these
    // from the quantum backend's job results.
    let generate = wsr::os_wsr_generator();
    let (settings, outcomes) = match (
        generate(args.rounds * BITS_PER_ROUND),
        generate(args.rounds * BITS_PER_ROUND),
    ) {
        (Ok(s), Ok(o)) => (
            s.chunks(BITS_PER_ROUND).map(<[u8]>::to_vec).collect(),
            o.chunks(BITS_PER_ROUND).map(<[u8]>::to_vec).collect(),
        ),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Failed to synthesize sampling batch: {}", e);
            std::process::exit(1);
        }
    };

    let estimator = FixedBellEstimator::new(args.correlator);
    let result = match SamplingResult::ingest(settings, outcomes, &estimator) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to ingest sampling batch: {}", e);
            std::process::exit(1);
        }
    };

    let (losing, winning, correlator) = result.bell_values();
    info!(
        "Bell values: losing={:.4}, winning={:.4}, correlator={:.4}",
        losing, winning, correlator
    );
    if !result.statistics().is_quantum() {
        warn!("Correlator does not exceed the classical bound of 2; planning will likely fail");
    }

    let planner = BudgetPlanner::new(ModelOracles::new());
    match planner.derive_parameters(&result, &config) {
        Ok(params) => {
            info!("Extractor parameters derived");
            println!("First stage (two-source extractor):");
            println!("  input bits:  {}", params.ext1_input_bits);
            println!("  output bits: {}", params.ext1_output_bits);
            println!("  raw bytes:   {}", params.ext1_raw_bytes.len());
            println!("  seed bytes:  {}", params.ext1_seed_bytes.len());
            if params.second_stage_enabled() {
                println!("Second stage (seeded extractor):");
                println!("  seed bits:   {}", params.ext2_seed_bits);
                println!("  multiplier:  {}", params.ext2_multiplier);
            } else {
                println!("Second stage: disabled by policy");
            }
        }
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            std::process::exit(1);
        }
    }
}
