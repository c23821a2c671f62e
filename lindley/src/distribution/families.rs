//! Common discrete-time families.

use super::{support_width, DiscreteDistribution, MAX_SUPPORT_WIDTH, TAIL_EPSILON};
use crate::error::{DistributionError, DistributionResult};

impl DiscreteDistribution {
    /// Every value in `lo..=hi` equally likely.
    pub fn uniform(lo: i64, hi: i64) -> DistributionResult<Self> {
        if lo > hi {
            return Err(DistributionError::InvalidParameter(
                "uniform bounds must satisfy lo <= hi",
            ));
        }
        let width = support_width(lo, hi)?;
        Ok(Self::from_parts(lo, vec![1.0 / width as f64; width]))
    }

    /// Number of failures before the first success, with success probability `p`.
    ///
    /// Truncated where the remaining tail drops below [`TAIL_EPSILON`](crate::TAIL_EPSILON).
    pub fn geometric(p: f64) -> DistributionResult<Self> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(DistributionError::InvalidParameter(
                "geometric success probability must lie in (0, 1]",
            ));
        }
        if p == 1.0 {
            return Ok(Self::point_mass(0));
        }

        // P(X >= n) = (1 - p)^n
        let terms = (TAIL_EPSILON.ln() / (1.0 - p).ln()).ceil().max(1.0);
        if terms > MAX_SUPPORT_WIDTH as f64 {
            return Err(DistributionError::SupportTooWide {
                width: terms as u64,
                max: MAX_SUPPORT_WIDTH,
            });
        }

        let pmf = (0..terms as i32).map(|k| p * (1.0 - p).powi(k)).collect();
        Ok(normalised(0, pmf))
    }

    /// Number of successes in `n` independent trials with success probability `p`.
    pub fn binomial(n: u32, p: f64) -> DistributionResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::InvalidParameter(
                "binomial success probability must lie in [0, 1]",
            ));
        }
        if p == 0.0 {
            return Ok(Self::point_mass(0));
        }
        if p == 1.0 {
            return Ok(Self::point_mass(i64::from(n)));
        }
        support_width(0, i64::from(n))?;

        let (ln_p, ln_q) = (p.ln(), (1.0 - p).ln());
        let nf = f64::from(n);
        let mut ln_choose = 0.0;
        let pmf = (0..=n)
            .map(|k| {
                let kf = f64::from(k);
                if k > 0 {
                    ln_choose += (nf - kf + 1.0).ln() - kf.ln();
                }
                (ln_choose + kf * ln_p + (nf - kf) * ln_q).exp()
            })
            .collect();
        Ok(normalised(0, pmf))
    }

    /// Poisson with rate `lambda`, truncated where the remaining tail drops below
    /// [`TAIL_EPSILON`](crate::TAIL_EPSILON).
    pub fn poisson(lambda: f64) -> DistributionResult<Self> {
        if !(lambda.is_finite() && lambda >= 0.0) {
            return Err(DistributionError::InvalidParameter(
                "poisson rate must be finite and non-negative",
            ));
        }
        if lambda == 0.0 {
            return Ok(Self::point_mass(0));
        }

        let ln_lambda = lambda.ln();
        let mut ln_factorial = 0.0;
        let mut cumulative = 0.0;
        let mut pmf = Vec::new();
        for k in 0u64.. {
            if k >= MAX_SUPPORT_WIDTH {
                return Err(DistributionError::SupportTooWide {
                    width: k,
                    max: MAX_SUPPORT_WIDTH,
                });
            }
            let kf = k as f64;
            if k > 0 {
                ln_factorial += kf.ln();
            }
            let p = (kf * ln_lambda - lambda - ln_factorial).exp();
            cumulative += p;
            pmf.push(p);
            if kf > lambda && 1.0 - cumulative < TAIL_EPSILON {
                break;
            }
        }
        Ok(normalised(0, pmf))
    }
}

/// Rescale to unit mass and strip zero edges.
fn normalised(offset: i64, mut pmf: Vec<f64>) -> DiscreteDistribution {
    let total: f64 = pmf.iter().sum();
    pmf.iter_mut().for_each(|p| *p /= total);
    DiscreteDistribution::from_parts(offset, pmf)
}
