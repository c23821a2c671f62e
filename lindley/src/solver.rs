use tracing::{debug, info, span, warn, Level};

use crate::{
    config::SolverConfig,
    distribution::DiscreteDistribution,
    error::{DistributionResult, SolveError, SolveResult},
};

/// One step of the Lindley recurrence: `max(W + C, 0)`.
pub fn lindley_step(
    waiting: &DiscreteDistribution,
    increment: &DiscreteDistribution,
) -> DistributionResult<DiscreteDistribution> {
    Ok((waiting + increment)?.floor_at(0))
}

/// The converged waiting-time distribution and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyState {
    distribution: DiscreteDistribution,
    iterations: usize,
    drift: f64,
}

impl SteadyState {
    /// The steady-state waiting-time distribution.
    pub fn distribution(&self) -> &DiscreteDistribution {
        &self.distribution
    }

    /// Take the distribution, dropping the rest.
    pub fn into_distribution(self) -> DiscreteDistribution {
        self.distribution
    }

    /// Number of Lindley steps taken.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Mean of the per-step increment. Negative for a stable queue.
    pub fn drift(&self) -> f64 {
        self.drift
    }
}

/// Computes steady-state waiting times by power iteration of the Lindley recurrence.
///
/// Starting from an empty system, `W(n+1) = max(W(n) + C, 0)` is applied until two consecutive
/// iterates compare equal under the configured [`Convergence`](crate::Convergence) criterion, or
/// the iteration budget runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitingTimeSolver {
    config: SolverConfig,
}

impl WaitingTimeSolver {
    /// Create a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver's settings.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Steady-state waiting time for a queue whose per-step increment is
    /// `service - interarrival`.
    pub fn solve(
        &self,
        interarrival: &DiscreteDistribution,
        service: &DiscreteDistribution,
    ) -> SolveResult<SteadyState> {
        self.iterate(&(service - interarrival)?)
    }

    /// Iterate the recurrence for a given increment distribution.
    ///
    /// The step always runs at least once before the convergence check.
    pub fn iterate(&self, increment: &DiscreteDistribution) -> SolveResult<SteadyState> {
        self.config.validate()?;

        let drift = increment.mean();
        let span = span!(Level::INFO, "solve waiting time",
            // Convert to u64 so tracing will treat this as an integer instead of a string.
            max_iterations = self.config.max_iterations as u64,
            drift
        );
        let _entered = span.enter();

        if drift >= 0.0 {
            warn!(drift, "Non-negative drift: the waiting time may not converge");
        }

        let mut current = DiscreteDistribution::point_mass(0);
        for iteration in 1..=self.config.max_iterations {
            let mut next = lindley_step(&current, increment).inspect_err(|e| {
                warn!(iteration = iteration as u64, error = %e, "Lindley step failed");
            })?;
            if let Some(epsilon) = self.config.tail_epsilon {
                next = next.trim_tail(epsilon)?;
            }
            debug!(iteration = iteration as u64, mean = next.mean(), "Lindley step");

            if self
                .config
                .convergence
                .is_converged(&current, &next, self.config.tolerance)
            {
                info!(
                    iterations = iteration as u64,
                    mean = next.mean(),
                    "Converged"
                );
                return Ok(SteadyState {
                    distribution: next,
                    iterations: iteration,
                    drift,
                });
            }
            current = next;
        }

        let last_mean = current.mean();
        warn!(
            iterations = self.config.max_iterations as u64,
            last_mean, "Ran out of iterations"
        );
        Err(SolveError::NotConverged {
            iterations: self.config.max_iterations,
            last_mean,
            drift,
        })
    }
}
