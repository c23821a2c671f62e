//! Errors.

use thiserror::Error;

/// A distribution could not be built from the given input.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DistributionError {
    /// No outcomes were given.
    #[error("A distribution needs at least one outcome")]
    Empty,

    /// The value and probability sequences have different lengths.
    #[error("Got {values} values but {probabilities} probabilities")]
    LengthMismatch {
        /// The number of values given.
        values: usize,
        /// The number of probabilities given.
        probabilities: usize,
    },

    /// A probability was below zero.
    #[error("Probability {probability} for value {value} is negative")]
    NegativeProbability {
        /// The outcome the probability belongs to.
        value: i64,
        /// The offending probability.
        probability: f64,
    },

    /// A probability was NaN or infinite.
    #[error("Probability for value {value} is not finite")]
    NonFiniteProbability {
        /// The outcome the probability belongs to.
        value: i64,
    },

    /// The probabilities do not add up to one.
    #[error("Probabilities sum to {sum}, expected 1")]
    NotNormalised {
        /// The actual total.
        sum: f64,
    },

    /// The support is too wide to store densely.
    #[error("Support spans {width} values, more than the maximum of {max}")]
    SupportTooWide {
        /// Number of lattice points between the smallest and largest value.
        width: u64,
        /// The largest width allowed.
        max: u64,
    },

    /// An operation would move an outcome outside the range of `i64`.
    #[error("Outcome outside the representable range")]
    OutOfRange,

    /// A family or operation parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// The waiting-time solver failed.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SolveError {
    /// An iterate could not be computed, for instance because its support left the range of
    /// `i64` or grew past [`MAX_SUPPORT_WIDTH`](crate::MAX_SUPPORT_WIDTH).
    #[error("Distribution operation failed")]
    Distribution(#[from] DistributionError),

    /// The solver configuration cannot be used.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(&'static str),

    /// The iteration ran out of fuel before two iterates compared equal.
    ///
    /// Expected when the drift is non-negative.
    #[error(
        "Did not converge within {iterations} iterations (drift: {drift}, last mean: {last_mean})"
    )]
    NotConverged {
        /// Number of Lindley steps taken.
        iterations: usize,
        /// Mean of the last iterate.
        last_mean: f64,
        /// Mean of the per-step increment.
        drift: f64,
    },
}

/// Result type for distribution construction and operations.
pub type DistributionResult<T> = std::result::Result<T, DistributionError>;

/// Result type for the solver.
pub type SolveResult<T> = std::result::Result<T, SolveError>;
