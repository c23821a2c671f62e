//! Algebra on independent random variables.
//!
//! Operations that move the support can leave the range of `i64`, so they return a
//! [`DistributionResult`]. Flooring and capping stay inside the original support and cannot fail.

use std::ops::{Add, Neg, Sub};

use super::{support_width, DiscreteDistribution};
use crate::error::{DistributionError, DistributionResult};

impl DiscreteDistribution {
    /// Distribution of `X + Y` for independent `X` (self) and `Y`.
    pub fn convolve(&self, other: &Self) -> DistributionResult<Self> {
        let min = self
            .min()
            .checked_add(other.min())
            .ok_or(DistributionError::OutOfRange)?;
        let max = self
            .max()
            .checked_add(other.max())
            .ok_or(DistributionError::OutOfRange)?;
        let mut pmf = vec![0.0; support_width(min, max)?];
        for (i, &p) in self.pmf.iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            for (j, &q) in other.pmf.iter().enumerate() {
                pmf[i + j] += p * q;
            }
        }
        Ok(Self::from_parts(min, pmf))
    }

    /// Distribution of `-X`.
    pub fn negate(&self) -> DistributionResult<Self> {
        let offset = self.max().checked_neg().ok_or(DistributionError::OutOfRange)?;
        let pmf = self.pmf.iter().rev().copied().collect();
        Ok(Self::from_parts(offset, pmf))
    }

    /// Distribution of `X + by`.
    pub fn shift(&self, by: i64) -> DistributionResult<Self> {
        let offset = self.min().checked_add(by);
        let top = self.max().checked_add(by);
        match (offset, top) {
            (Some(offset), Some(_)) => Ok(Self {
                offset,
                pmf: self.pmf.clone(),
            }),
            _ => Err(DistributionError::OutOfRange),
        }
    }

    /// Distribution of `max(X, floor)`.
    ///
    /// All mass below `floor` moves onto `floor`.
    pub fn floor_at(&self, floor: i64) -> Self {
        if self.min() >= floor {
            return self.clone();
        }
        if self.max() <= floor {
            return Self::point_mass(floor);
        }

        let cut = (floor - self.offset) as usize;
        let mut pmf = Vec::with_capacity(self.pmf.len() - cut);
        pmf.push(self.pmf[..=cut].iter().sum());
        pmf.extend_from_slice(&self.pmf[cut + 1..]);
        Self::from_parts(floor, pmf)
    }

    /// Distribution of `min(X, cap)`.
    ///
    /// All mass above `cap` moves onto `cap`.
    pub fn cap_at(&self, cap: i64) -> Self {
        if self.max() <= cap {
            return self.clone();
        }
        if self.min() >= cap {
            return Self::point_mass(cap);
        }

        let cut = (cap - self.offset) as usize;
        let mut pmf = self.pmf[..cut].to_vec();
        pmf.push(self.pmf[cut..].iter().sum());
        Self::from_parts(self.offset, pmf)
    }

    /// Drop the largest outcomes while their combined mass stays below `epsilon`, then rescale.
    ///
    /// The smallest outcome is always kept.
    pub fn trim_tail(&self, epsilon: f64) -> DistributionResult<Self> {
        if !(0.0..1.0).contains(&epsilon) {
            return Err(DistributionError::InvalidParameter(
                "tail epsilon must lie in [0, 1)",
            ));
        }

        let mut keep = self.pmf.len();
        let mut dropped = 0.0;
        while keep > 1 && dropped + self.pmf[keep - 1] < epsilon {
            dropped += self.pmf[keep - 1];
            keep -= 1;
        }
        if keep == self.pmf.len() {
            return Ok(self.clone());
        }

        let kept: f64 = self.pmf[..keep].iter().sum();
        let pmf = self.pmf[..keep].iter().map(|p| p / kept).collect();
        Ok(Self::from_parts(self.offset, pmf))
    }
}

impl Add for &DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn add(self, rhs: &DiscreteDistribution) -> Self::Output {
        self.convolve(rhs)
    }
}

impl Add for DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn add(self, rhs: DiscreteDistribution) -> Self::Output {
        self.convolve(&rhs)
    }
}

impl Add<&DiscreteDistribution> for DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn add(self, rhs: &DiscreteDistribution) -> Self::Output {
        self.convolve(rhs)
    }
}

impl Sub for &DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn sub(self, rhs: &DiscreteDistribution) -> Self::Output {
        self.convolve(&rhs.negate()?)
    }
}

impl Sub for DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn sub(self, rhs: DiscreteDistribution) -> Self::Output {
        self.convolve(&rhs.negate()?)
    }
}

impl Sub<&DiscreteDistribution> for DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn sub(self, rhs: &DiscreteDistribution) -> Self::Output {
        self.convolve(&rhs.negate()?)
    }
}

impl Neg for &DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for DiscreteDistribution {
    type Output = DistributionResult<DiscreteDistribution>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
