//! Monte Carlo run of the scalar Lindley recurrence.

use bon::bon;
use lindley::{DiscreteDistribution, DistributionError};
use rand::distr::{weighted, weighted::WeightedIndex, Distribution};
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

/// The Monte Carlo cross-check could not run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SimulationError {
    /// The probabilities could not be turned into sampling weights.
    #[error("Unable to sample from distribution")]
    Weights(#[from] weighted::Error),

    /// The observed waiting times do not form a usable distribution.
    #[error("Unable to build the empirical distribution")]
    Empirical(#[from] DistributionError),

    /// Nothing would be observed.
    #[error("At least one sample is needed")]
    NoSamples,
}

/// How long to run the Monte Carlo cross-check.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    /// Steps discarded before observing, so the empty start is forgotten.
    pub warmup: usize,
    /// Number of observed waiting times.
    pub samples: usize,
    /// Seed for reproducibility.
    pub seed: Option<u64>,
}

#[bon]
impl SimulationConfig {
    /// Create a simulation config.
    #[builder]
    pub fn new(
        #[builder(default = 1_000)] warmup: usize,
        #[builder(default = 100_000)] samples: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            warmup,
            samples,
            seed,
        }
    }
}

/// Draws outcomes of a [`DiscreteDistribution`].
#[derive(Debug, Clone)]
pub struct DiscreteSampler {
    values: Vec<i64>,
    index: WeightedIndex<f64>,
}

impl DiscreteSampler {
    /// Create a sampler for the given distribution.
    pub fn new(distribution: &DiscreteDistribution) -> Result<Self, SimulationError> {
        let (values, weights): (Vec<i64>, Vec<f64>) = distribution.iter().unzip();
        let index = WeightedIndex::new(weights)?;
        Ok(Self { values, index })
    }
}

impl Distribution<i64> for DiscreteSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.values[self.index.sample(rng)]
    }
}

/// Simulates successive customers' waiting times, one customer at a time.
///
/// `W(n+1) = max(W(n) + b - a, 0)` with `a` an inter-arrival time and `b` a service time drawn
/// independently at each step.
pub struct LindleySimulation {
    interarrival: DiscreteSampler,
    service: DiscreteSampler,
    /// RNG for reproducibility
    rng: rand::rngs::StdRng,
}

impl LindleySimulation {
    /// Create a new simulation
    ///
    /// # Arguments
    /// * `interarrival` - Inter-arrival time distribution
    /// * `service` - Service time distribution
    /// * `seed` - Optional seed for reproducibility
    pub fn new(
        interarrival: &DiscreteDistribution,
        service: &DiscreteDistribution,
        seed: Option<u64>,
    ) -> Result<Self, SimulationError> {
        let rng = match seed {
            Some(s) => rand::rngs::StdRng::seed_from_u64(s),
            None => rand::rngs::StdRng::from_os_rng(),
        };

        Ok(Self {
            interarrival: DiscreteSampler::new(interarrival)?,
            service: DiscreteSampler::new(service)?,
            rng,
        })
    }

    /// Run from an empty system and return the empirical waiting-time distribution of the
    /// customers after the warm-up.
    pub fn run(
        &mut self,
        warmup: usize,
        samples: usize,
    ) -> Result<DiscreteDistribution, SimulationError> {
        if samples == 0 {
            return Err(SimulationError::NoSamples);
        }
        debug!(
            warmup = warmup as u64,
            samples = samples as u64,
            "Running Monte Carlo simulation"
        );

        let mut waiting: i64 = 0;
        let mut observed = Vec::with_capacity(samples);
        for step in 0..warmup + samples {
            let increment = self
                .service
                .sample(&mut self.rng)
                .saturating_sub(self.interarrival.sample(&mut self.rng));
            waiting = waiting.saturating_add(increment).max(0);
            if step >= warmup {
                observed.push(waiting);
            }
        }

        Ok(DiscreteDistribution::from_samples(observed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interarrival() -> DiscreteDistribution {
        DiscreteDistribution::new(&[4, 8, 20], &[0.4, 0.5, 0.1]).unwrap()
    }

    #[test]
    fn test_sampler_mean() {
        let d = interarrival();
        let sampler = DiscreteSampler::new(&d).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        let samples: Vec<i64> = (0..10_000).map(|_| sampler.sample(&mut rng)).collect();
        let mean = samples.iter().sum::<i64>() as f64 / samples.len() as f64;

        // Standard deviation is ~4.6, so the standard error is ~0.05.
        assert!(
            (mean - d.mean()).abs() < 0.3,
            "Mean {:.4} too far from expected {:.4}",
            mean,
            d.mean()
        );
        assert!(samples.iter().all(|s| [4, 8, 20].contains(s)));
    }

    #[test]
    fn test_reproducibility() {
        let service = DiscreteDistribution::uniform(3, 7).unwrap();
        let mut sim1 = LindleySimulation::new(&interarrival(), &service, Some(42)).unwrap();
        let mut sim2 = LindleySimulation::new(&interarrival(), &service, Some(42)).unwrap();

        assert_eq!(
            sim1.run(100, 1_000).unwrap(),
            sim2.run(100, 1_000).unwrap(),
            "Same seed should produce same result"
        );
    }

    #[test]
    fn test_deterministic_queue_never_waits() {
        let mut sim = LindleySimulation::new(
            &DiscreteDistribution::point_mass(5),
            &DiscreteDistribution::point_mass(3),
            None,
        )
        .unwrap();

        assert_eq!(
            sim.run(0, 100).unwrap(),
            DiscreteDistribution::point_mass(0)
        );
    }

    #[test]
    fn test_no_samples() {
        let mut sim = LindleySimulation::new(&interarrival(), &interarrival(), Some(1)).unwrap();
        assert!(matches!(sim.run(10, 0), Err(SimulationError::NoSamples)));
    }
}
