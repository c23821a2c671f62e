//! Steady-state waiting times of discrete-time queues.
//!
//! In a single-server queue the waiting time of the next customer obeys the Lindley recurrence
//! `W(n+1) = max(W(n) + B - A, 0)`, where `A` is the time until the next arrival and `B` the
//! service time of the customer ahead. When time is discrete, every quantity is a
//! [`DiscreteDistribution`] over the integers, and the recurrence can be iterated on whole
//! distributions until it stops moving.
//!
//! [`WaitingTimeSolver`] does that iteration, bounded by an iteration budget so that unstable
//! queues (non-negative drift) are reported as errors instead of looping forever.
//!
//! See the README for an example.

#![deny(missing_docs)]

#[cfg(doctest)]
use doc_comment::doctest;
#[cfg(doctest)]
doctest!("../../README.md");

mod config;
mod distribution;
pub mod error;
mod solver;

pub use config::{Convergence, SolverConfig};
pub use distribution::{
    DiscreteDistribution, MAX_SUPPORT_WIDTH, NORMALISATION_TOLERANCE, TAIL_EPSILON,
};
pub use error::{DistributionError, SolveError};
pub use solver::{lindley_step, SteadyState, WaitingTimeSolver};

#[cfg(test)]
mod tests {
    use tracing::Level;
    use tracing_capture::{CaptureLayer, SharedStorage};
    use tracing_subscriber::layer::SubscriberExt;

    use crate::{DiscreteDistribution, SolverConfig, WaitingTimeSolver};

    fn capture<T>(f: impl FnOnce() -> T) -> (T, SharedStorage) {
        let subscriber = tracing_subscriber::fmt()
            .pretty()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let storage = SharedStorage::default();
        let subscriber = subscriber.with(CaptureLayer::new(&storage));

        let result = tracing::subscriber::with_default(subscriber, f);
        (result, storage)
    }

    #[test]
    fn test_tracing_converged() {
        let interarrival = DiscreteDistribution::new(&[4, 8, 20], &[0.4, 0.5, 0.1]).unwrap();
        let service = DiscreteDistribution::new(&[4, 5, 6], &[0.2, 0.1, 0.7]).unwrap();
        let solver = WaitingTimeSolver::new(SolverConfig::builder().max_iterations(500).build());

        let (steady, storage) = capture(|| solver.solve(&interarrival, &service));
        let steady = steady.expect("should converge");

        let storage = storage.lock();

        let solve_spans: Vec<_> = storage
            .all_spans()
            .filter(|span| span.metadata().name() == "solve waiting time")
            .collect();
        assert_eq!(solve_spans.len(), 1, "should be a single solver span");
        assert_eq!(
            solve_spans[0]["max_iterations"], 500u64,
            "max_iterations shouldn't be emitted as a string",
        );

        let steps = storage
            .all_events()
            .filter(|event| *event.metadata().level() == Level::DEBUG)
            .count();
        assert_eq!(steps, steady.iterations(), "one debug event per step");

        let warnings = storage
            .all_events()
            .filter(|event| *event.metadata().level() == Level::WARN)
            .count();
        assert_eq!(warnings, 0, "a stable queue should not warn");
    }

    #[test]
    fn test_tracing_not_converged() {
        let solver = WaitingTimeSolver::new(SolverConfig::builder().max_iterations(10).build());

        let (result, storage) = capture(|| {
            solver.solve(
                &DiscreteDistribution::point_mass(1),
                &DiscreteDistribution::point_mass(5),
            )
        });
        assert!(result.is_err());

        let storage = storage.lock();
        let warnings = storage
            .all_events()
            .filter(|event| *event.metadata().level() == Level::WARN)
            .count();
        assert_eq!(warnings, 2, "should warn about the drift and about running out");
    }
}
