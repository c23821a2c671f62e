//! Discrete distributions over the integers.
//!
//! Time is discrete, so every outcome is an integer number of slots. A distribution is stored
//! densely from its smallest to its largest outcome, which keeps convolution a plain nested loop
//! over two slices.

mod families;
mod ops;

use std::fmt::{self, Display};

use crate::error::{DistributionError, DistributionResult};

/// Probabilities handed to a constructor must sum to one within this tolerance.
pub const NORMALISATION_TOLERANCE: f64 = 1e-9;

/// Infinite-support families are truncated once the remaining tail mass drops below this.
pub const TAIL_EPSILON: f64 = 1e-12;

/// The largest number of lattice points a constructed distribution may span.
pub const MAX_SUPPORT_WIDTH: u64 = 1 << 24;

/// A random variable taking finitely many integer values.
///
/// Immutable: every operation returns a new distribution.
///
/// ```
/// use lindley::DiscreteDistribution;
///
/// let d = DiscreteDistribution::new(&[4, 8, 20], &[0.4, 0.5, 0.1]).unwrap();
/// assert!((d.mean() - 8.8).abs() < 1e-12);
/// assert_eq!(d.min(), 4);
/// assert_eq!(d.max(), 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistribution {
    /// The value of `pmf[0]`.
    offset: i64,
    /// Never empty. The first and last entries are non-zero.
    pmf: Vec<f64>,
}

impl DiscreteDistribution {
    /// Build a distribution from parallel sequences of outcomes and probabilities.
    ///
    /// Repeated outcomes have their probabilities added together.
    pub fn new(values: &[i64], probabilities: &[f64]) -> DistributionResult<Self> {
        if values.len() != probabilities.len() {
            return Err(DistributionError::LengthMismatch {
                values: values.len(),
                probabilities: probabilities.len(),
            });
        }
        Self::from_pairs_iter(values.iter().copied().zip(probabilities.iter().copied()))
    }

    /// Build a distribution from `(value, probability)` pairs.
    pub fn from_pairs(pairs: &[(i64, f64)]) -> DistributionResult<Self> {
        Self::from_pairs_iter(pairs.iter().copied())
    }

    /// Build a distribution from dense probabilities, where `pmf[i]` is the probability of
    /// `offset + i`.
    pub fn from_pmf(offset: i64, pmf: Vec<f64>) -> DistributionResult<Self> {
        if pmf.is_empty() {
            return Err(DistributionError::Empty);
        }
        let width = pmf.len() as u64;
        let last = i64::try_from(width - 1)
            .ok()
            .and_then(|extra| offset.checked_add(extra))
            .ok_or(DistributionError::SupportTooWide {
                width,
                max: MAX_SUPPORT_WIDTH,
            })?;
        support_width(offset, last)?;

        let sum = check_probabilities(
            pmf.iter()
                .enumerate()
                .map(|(i, &probability)| (offset + i as i64, probability)),
        )?;
        let pmf = pmf.into_iter().map(|p| p / sum).collect();
        Ok(Self::from_parts(offset, pmf))
    }

    /// A degenerate distribution: `value` with probability one.
    pub fn point_mass(value: i64) -> Self {
        Self {
            offset: value,
            pmf: vec![1.0],
        }
    }

    /// The empirical distribution of a set of observations.
    pub fn from_samples(samples: impl IntoIterator<Item = i64>) -> DistributionResult<Self> {
        let samples: Vec<i64> = samples.into_iter().collect();
        let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
            return Err(DistributionError::Empty);
        };
        let width = support_width(min, max)?;

        let mut pmf = vec![0.0; width];
        for sample in &samples {
            pmf[(sample - min) as usize] += 1.0;
        }
        let total = samples.len() as f64;
        pmf.iter_mut().for_each(|p| *p /= total);

        Ok(Self::from_parts(min, pmf))
    }

    fn from_pairs_iter(
        pairs: impl Iterator<Item = (i64, f64)> + Clone,
    ) -> DistributionResult<Self> {
        if pairs.clone().next().is_none() {
            return Err(DistributionError::Empty);
        }
        let sum = check_probabilities(pairs.clone())?;

        // Outcomes with zero probability are not part of the support.
        let support = pairs.filter(|&(_, probability)| probability > 0.0);
        let min = support.clone().map(|(value, _)| value).min();
        let max = support.clone().map(|(value, _)| value).max();
        let (Some(min), Some(max)) = (min, max) else {
            return Err(DistributionError::NotNormalised { sum });
        };
        let width = support_width(min, max)?;

        let mut pmf = vec![0.0; width];
        for (value, probability) in support {
            pmf[(value - min) as usize] += probability / sum;
        }

        Ok(Self::from_parts(min, pmf))
    }

    /// Strip zero mass from both ends.
    ///
    /// Callers guarantee at least one positive entry.
    pub(crate) fn from_parts(offset: i64, mut pmf: Vec<f64>) -> Self {
        let Some(first) = pmf.iter().position(|&p| p > 0.0) else {
            debug_assert!(false, "distribution without any mass");
            return Self::point_mass(offset);
        };
        let last = pmf.iter().rposition(|&p| p > 0.0).unwrap_or(first);

        pmf.truncate(last + 1);
        pmf.drain(..first);

        Self {
            offset: offset + first as i64,
            pmf,
        }
    }

    /// The smallest outcome with non-zero probability.
    pub fn min(&self) -> i64 {
        self.offset
    }

    /// The largest outcome with non-zero probability.
    pub fn max(&self) -> i64 {
        self.offset + (self.pmf.len() as i64 - 1)
    }

    /// Whether all the mass sits on a single outcome.
    pub fn is_degenerate(&self) -> bool {
        self.pmf.len() == 1
    }

    /// P(X = value).
    pub fn pmf(&self, value: i64) -> f64 {
        self.index_of(value)
            .and_then(|i| self.pmf.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// P(X ≤ value).
    pub fn cdf(&self, value: i64) -> f64 {
        if value < self.min() {
            return 0.0;
        }
        if value >= self.max() {
            return 1.0;
        }
        let end = self.index_of(value).map_or(self.pmf.len(), |i| i + 1);
        self.pmf[..end].iter().sum::<f64>().min(1.0)
    }

    /// Smallest outcome `x` with P(X ≤ x) ≥ `q`.
    pub fn quantile(&self, q: f64) -> DistributionResult<i64> {
        if !(0.0..=1.0).contains(&q) {
            return Err(DistributionError::InvalidParameter(
                "quantile must lie in [0, 1]",
            ));
        }
        let mut cumulative = 0.0;
        for (value, probability) in self.iter() {
            cumulative += probability;
            if cumulative >= q {
                return Ok(value);
            }
        }
        // Rounding left the total a hair under one.
        Ok(self.max())
    }

    /// Outcomes with non-zero probability, in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.pmf
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0.0)
            .map(|(i, &p)| (self.offset + i as i64, p))
    }

    /// Sum of all probabilities. One, up to rounding.
    pub fn total_mass(&self) -> f64 {
        self.pmf.iter().sum()
    }

    /// Expected value E\[X\].
    pub fn mean(&self) -> f64 {
        self.iter().map(|(x, p)| x as f64 * p).sum()
    }

    /// Variance Var(X).
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.iter()
            .map(|(x, p)| {
                let d = x as f64 - mean;
                d * d * p
            })
            .sum()
    }

    /// Standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard deviation divided by the mean. `None` when the mean is zero.
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        let mean = self.mean();
        (mean != 0.0).then(|| self.std_dev() / mean)
    }

    /// Total variation distance: half the L1 distance between the two mass functions.
    ///
    /// Only the outcomes of the two supports are visited, however far apart they lie.
    pub fn total_variation(&self, other: &Self) -> f64 {
        let ours: f64 = self.iter().map(|(x, p)| (p - other.pmf(x)).abs()).sum();
        let theirs_only: f64 = other
            .iter()
            .filter(|&(x, _)| self.pmf(x) == 0.0)
            .map(|(_, q)| q)
            .sum();
        (ours + theirs_only) / 2.0
    }

    fn index_of(&self, value: i64) -> Option<usize> {
        value
            .checked_sub(self.offset)
            .and_then(|i| usize::try_from(i).ok())
    }
}

impl Display for DiscreteDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (value, probability)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}: {probability}")?;
        }
        f.write_str("}")
    }
}

/// Validate each probability and return the total, which must be one within tolerance.
fn check_probabilities(pairs: impl Iterator<Item = (i64, f64)>) -> DistributionResult<f64> {
    let mut sum = 0.0;
    for (value, probability) in pairs {
        if !probability.is_finite() {
            return Err(DistributionError::NonFiniteProbability { value });
        }
        if probability < 0.0 {
            return Err(DistributionError::NegativeProbability { value, probability });
        }
        sum += probability;
    }
    if (sum - 1.0).abs() > NORMALISATION_TOLERANCE {
        return Err(DistributionError::NotNormalised { sum });
    }
    Ok(sum)
}

/// Number of lattice points in `min..=max`.
pub(crate) fn support_width(min: i64, max: i64) -> DistributionResult<usize> {
    let width = i128::from(max) - i128::from(min) + 1;
    if width > i128::from(MAX_SUPPORT_WIDTH) {
        return Err(DistributionError::SupportTooWide {
            width: u64::try_from(width).unwrap_or(u64::MAX),
            max: MAX_SUPPORT_WIDTH,
        });
    }
    Ok(width as usize)
}
