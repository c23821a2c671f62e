//! Scenario runner for solving and cross-checking a queue

use crate::simulation::{LindleySimulation, SimulationConfig, SimulationError};
use lindley::{
    DiscreteDistribution, DistributionError, SolveError, SolverConfig, SteadyState,
    WaitingTimeSolver,
};
use thiserror::Error;
use tracing::info;

/// Configuration for a queue scenario
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Scenario name for identification
    pub name: String,

    /// Inter-arrival time outcomes as `(value, probability)` pairs
    pub interarrival: Vec<(i64, f64)>,

    /// Service time outcomes as `(value, probability)` pairs
    pub service: Vec<(i64, f64)>,

    /// Solver settings
    pub solver: SolverConfig,

    /// Optional Monte Carlo cross-check
    pub simulation: Option<SimulationConfig>,
}

impl ScenarioConfig {
    /// Arrivals 4, 8 or 20 slots apart, service of 4, 5 or 6 slots.
    pub fn reference() -> Self {
        Self {
            name: "reference".to_string(),
            interarrival: vec![(4, 0.4), (8, 0.5), (20, 0.1)],
            service: vec![(4, 0.2), (5, 0.1), (6, 0.7)],
            solver: SolverConfig::default(),
            simulation: Some(SimulationConfig::builder().samples(200_000).build()),
        }
    }
}

/// Which input distribution was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Inter-arrival times
    Interarrival,
    /// Service times
    Service,
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Interarrival => write!(f, "inter-arrival"),
            Input::Service => write!(f, "service"),
        }
    }
}

/// Error types for scenario execution
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScenarioError {
    /// One of the input distributions is invalid.
    #[error("Invalid {which} distribution")]
    InvalidDistribution {
        /// The rejected input.
        which: Input,
        /// Why it was rejected.
        #[source]
        source: DistributionError,
    },

    /// The solver failed.
    #[error("Solver failed")]
    Solve(#[from] SolveError),

    /// The Monte Carlo cross-check failed.
    #[error("Simulation failed")]
    Simulation(#[from] SimulationError),
}

/// Everything a scenario run produced
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Inter-arrival time distribution
    pub interarrival: DiscreteDistribution,
    /// Service time distribution
    pub service: DiscreteDistribution,
    /// Solver result
    pub steady_state: SteadyState,
    /// Empirical waiting times, if a simulation was configured
    pub simulated: Option<DiscreteDistribution>,
}

/// Orchestrates a queue scenario
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Create a new scenario runner
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// The scenario being run
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Solve the scenario and, if configured, cross-check it by simulation
    pub fn run(&self) -> Result<ScenarioOutcome, ScenarioError> {
        let interarrival = parse(&self.config.interarrival, Input::Interarrival)?;
        let service = parse(&self.config.service, Input::Service)?;

        info!(
            scenario = self.config.name.as_str(),
            solver = %self.config.solver,
            "Running scenario"
        );
        let steady_state =
            WaitingTimeSolver::new(self.config.solver).solve(&interarrival, &service)?;

        let simulated = match self.config.simulation {
            Some(sim) => {
                let mut simulation = LindleySimulation::new(&interarrival, &service, sim.seed)?;
                Some(simulation.run(sim.warmup, sim.samples)?)
            }
            None => None,
        };

        Ok(ScenarioOutcome {
            interarrival,
            service,
            steady_state,
            simulated,
        })
    }
}

fn parse(pairs: &[(i64, f64)], which: Input) -> Result<DiscreteDistribution, ScenarioError> {
    DiscreteDistribution::from_pairs(pairs)
        .map_err(|source| ScenarioError::InvalidDistribution { which, source })
}
