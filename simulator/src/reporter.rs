//! Reporting and visualization of scenario results

use crate::scenario::{ScenarioConfig, ScenarioOutcome};
use crate::visualise::Visualiser;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the simulation reporter
pub struct ReporterConfig {
    /// Directory where visualizations will be written
    pub output_dir: PathBuf,
    /// Directory containing gnuplot template files
    pub templates_dir: PathBuf,
}

/// Reporter for printing summary statistics and generating visualizations
pub struct SimulationReporter<'a> {
    outcome: &'a ScenarioOutcome,
    scenario_config: &'a ScenarioConfig,
    config: ReporterConfig,
}

impl<'a> SimulationReporter<'a> {
    /// Create a new simulation reporter
    pub fn new(
        outcome: &'a ScenarioOutcome,
        scenario_config: &'a ScenarioConfig,
        config: ReporterConfig,
    ) -> Self {
        Self {
            outcome,
            scenario_config,
            config,
        }
    }

    /// Summary statistics as printable text
    pub fn summary(&self) -> String {
        self.to_string()
    }

    /// Print summary statistics to stdout
    pub fn print_summary(&self) {
        print!("{self}");
    }

    /// Generate all visualizations
    pub fn generate_visualizations(&self) -> std::io::Result<()> {
        let visualiser = Visualiser::new(
            self.outcome.steady_state.distribution(),
            &self.config.output_dir,
            &self.config.templates_dir,
        );

        visualiser.generate_all()?;

        println!("\n=== Charts ===");
        println!(
            "Waiting time PMF: {}",
            self.config.output_dir.join("waiting_time_pmf.png").display()
        );
        println!(
            "Waiting time CDF: {}",
            self.config.output_dir.join("waiting_time_cdf.png").display()
        );

        Ok(())
    }

    /// Print summary and generate visualizations
    pub fn report(&self) -> std::io::Result<()> {
        self.print_summary();
        self.generate_visualizations()
    }
}

impl fmt::Display for SimulationReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scenario = self.scenario_config;
        let steady = &self.outcome.steady_state;
        let waiting = steady.distribution();

        writeln!(f, "\n=== Scenario Configuration ===")?;
        writeln!(f, "Name:                {}", scenario.name)?;
        writeln!(f, "Inter-arrival times: {}", self.outcome.interarrival)?;
        writeln!(f, "Service times:       {}", self.outcome.service)?;
        writeln!(f, "Solver:              {}", scenario.solver)?;

        writeln!(f, "\n=== Steady State ===")?;
        writeln!(f, "Drift:               {:.4}", steady.drift())?;
        writeln!(f, "Iterations:          {}", steady.iterations())?;
        writeln!(f, "Mean wait:           {:.6}", waiting.mean())?;
        writeln!(f, "Std dev:             {:.6}", waiting.std_dev())?;
        writeln!(
            f,
            "Cx:                  {}",
            waiting
                .coefficient_of_variation()
                .map_or_else(|| "n/a".to_string(), |cx| format!("{cx:.4}"))
        )?;
        writeln!(f, "P(W = 0):            {:.6}", waiting.pmf(0))?;
        writeln!(f, "Support:             {} to {}", waiting.min(), waiting.max())?;

        writeln!(f, "\nPercentiles:")?;
        for (label, q) in [("p50", 0.5), ("p90", 0.9), ("p99", 0.99)] {
            let value = waiting
                .quantile(q)
                .map_or_else(|e| e.to_string(), |v| v.to_string());
            writeln!(f, "  {label}: {value}")?;
        }

        if let Some(simulated) = &self.outcome.simulated {
            writeln!(f, "\n=== Monte Carlo ===")?;
            writeln!(f, "Mean wait:           {:.6}", simulated.mean())?;
            writeln!(f, "P(W = 0):            {:.6}", simulated.pmf(0))?;
            writeln!(
                f,
                "Total variation:     {:.6}",
                waiting.total_variation(simulated)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioRunner;

    #[test]
    fn summary_lists_results() {
        let config = ScenarioConfig {
            simulation: None,
            ..ScenarioConfig::reference()
        };
        let outcome = ScenarioRunner::new(config.clone()).run().unwrap();
        let reporter = SimulationReporter::new(
            &outcome,
            &config,
            ReporterConfig {
                output_dir: PathBuf::from("unused"),
                templates_dir: PathBuf::from("unused"),
            },
        );

        let summary = reporter.summary();
        assert!(summary.contains("Name:                reference"));
        assert!(summary.contains("Drift:               -3.5000"));
        assert!(summary.contains("Mean wait:           1.414500"));
        assert!(summary.contains("p50: 0"));
        assert!(!summary.contains("Monte Carlo"));
    }
}
