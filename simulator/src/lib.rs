//! Scenarios, Monte Carlo cross-checks and charts for the `lindley` waiting-time solver.

pub mod reporter;
pub mod scenario;
pub mod simulation;
pub mod visualise;
