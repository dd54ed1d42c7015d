//! Promises/A+ Compliance Runner
//!
//! Runs the built-in suite against the eventual engine and prints a
//! summary, or the full report as JSON.

use aplus_harness::{aplus_suite, ComplianceHarness};
use clap::Parser;
use eventual::RuntimeConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "aplus_runner", about = "Run the Promises/A+ compliance suite")]
struct Cli {
    /// Only run cases whose id matches this regular expression
    filter: Option<String>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Runtime configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<RuntimeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(RuntimeConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(RuntimeConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: could not load config: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut harness = ComplianceHarness::with_config(config);
    if let Some(pattern) = &cli.filter {
        if let Err(e) = harness.set_filter(pattern) {
            eprintln!("Error: invalid filter '{}': {}", pattern, e);
            return ExitCode::from(2);
        }
    }

    let report = harness.run_suite(&aplus_suite());
    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        println!("{}", report.summary());
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
