use std::fmt::{self, Display};

use bon::bon;

use crate::{
    distribution::DiscreteDistribution,
    error::{SolveError, SolveResult},
};

const DEFAULT_MAX_ITERATIONS: usize = 10_000;
const DEFAULT_TOLERANCE: f64 = 1e-9;

/// How two consecutive iterates are judged equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum Convergence {
    /// The means agree within `tolerance * max(1, |m1|, |m2|)`.
    ///
    /// Cheap, but higher moments may still be moving when the loop stops.
    #[default]
    Mean,
    /// The total variation distance is at most `tolerance`.
    TotalVariation,
}

impl Convergence {
    /// Whether `current` is close enough to `previous` to stop iterating.
    pub fn is_converged(
        self,
        previous: &DiscreteDistribution,
        current: &DiscreteDistribution,
        tolerance: f64,
    ) -> bool {
        match self {
            Convergence::Mean => {
                let (a, b) = (previous.mean(), current.mean());
                (a - b).abs() <= tolerance * 1f64.max(a.abs()).max(b.abs())
            }
            Convergence::TotalVariation => previous.total_variation(current) <= tolerance,
        }
    }
}

impl Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Convergence::Mean => "mean",
            Convergence::TotalVariation => "total variation",
        })
    }
}

/// Settings for the waiting-time fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct SolverConfig {
    pub(crate) max_iterations: usize,
    pub(crate) tolerance: f64,
    pub(crate) convergence: Convergence,
    pub(crate) tail_epsilon: Option<f64>,
}

#[bon]
impl SolverConfig {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// Upper bound on the number of Lindley steps before giving up.
        #[builder(default = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
        /// Passed to the convergence criterion.
        #[builder(default = DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// How consecutive iterates are compared.
        #[builder(default)]
        convergence: Convergence,
        /// When set, each iterate sheds upper-tail mass below this threshold, which stops the
        /// support from growing without bound.
        tail_epsilon: Option<f64>,
    ) -> Self {
        Self {
            max_iterations,
            tolerance,
            convergence,
            tail_epsilon,
        }
    }

    /// Upper bound on the number of Lindley steps.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Tolerance passed to the convergence criterion.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// How consecutive iterates are compared.
    pub fn convergence(&self) -> Convergence {
        self.convergence
    }

    /// Upper-tail trimming threshold, if any.
    pub fn tail_epsilon(&self) -> Option<f64> {
        self.tail_epsilon
    }

    pub(crate) fn validate(&self) -> SolveResult<()> {
        if self.max_iterations == 0 {
            return Err(SolveError::InvalidConfig("max_iterations must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(SolveError::InvalidConfig(
                "tolerance must be finite and non-negative",
            ));
        }
        if let Some(epsilon) = self.tail_epsilon {
            if !(0.0..1.0).contains(&epsilon) {
                return Err(SolveError::InvalidConfig("tail_epsilon must lie in [0, 1)"));
            }
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            convergence: Convergence::default(),
            tail_epsilon: None,
        }
    }
}

impl Display for SolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_iterations: {}, tolerance: {:e}, convergence: {}",
            self.max_iterations, self.tolerance, self.convergence
        )?;
        if let Some(epsilon) = self.tail_epsilon {
            write!(f, ", tail_epsilon: {epsilon:e}")?;
        }
        Ok(())
    }
}
