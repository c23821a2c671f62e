//! Solve the reference queue, cross-check it by simulation and optionally chart the result.
//!
//! Usage: `waiting_time [OUTPUT_DIR]`

use simulator::reporter::{ReporterConfig, SimulationReporter};
use simulator::scenario::{ScenarioConfig, ScenarioRunner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, Level};

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let output_dir = std::env::args().nth(1).map(PathBuf::from);

    let runner = ScenarioRunner::new(ScenarioConfig::reference());
    let outcome = match runner.run() {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, source = ?std::error::Error::source(&e), "Scenario failed");
            return ExitCode::FAILURE;
        }
    };

    let reporter = SimulationReporter::new(
        &outcome,
        runner.config(),
        ReporterConfig {
            output_dir: output_dir.clone().unwrap_or_default(),
            templates_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates")),
        },
    );

    let result = match output_dir {
        Some(_) => reporter.report(),
        None => {
            reporter.print_summary();
            Ok(())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Unable to generate charts");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
