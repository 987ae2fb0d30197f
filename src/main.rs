// Runs the softmax sanity check on a synthetic batch and prints the report
// as JSON on stdout. Usage:
//   softmax-linear [config.json]
// Log verbosity follows RUST_LOG (default: info).
use std::process::ExitCode;

use log::{error, info, warn};
use softmax_linear::{run_sanity_check, Result, SanityConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            warn!("sanity check failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            SanityConfig::load_json(&path)?
        }
        None => SanityConfig::default(),
    };

    let report = run_sanity_check(&config)?;

    info!(
        "naive loss {:.6} ({:.1} ms), vectorized loss {:.6} ({:.1} ms), expected ~{:.6}",
        report.naive_loss,
        report.naive_ms,
        report.vectorized_loss,
        report.vectorized_ms,
        report.expected_initial_loss
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(report.passed(config.tolerance))
}
