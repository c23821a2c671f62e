#![allow(dead_code)]

use lindley::DiscreteDistribution;

/// Inter-arrival times of the reference queue. Mean 8.8.
pub fn interarrival() -> DiscreteDistribution {
    DiscreteDistribution::new(&[4, 8, 20], &[0.4, 0.5, 0.1]).unwrap()
}

/// Service times of the reference queue. Mean 5.3.
pub fn service() -> DiscreteDistribution {
    DiscreteDistribution::new(&[4, 5, 6], &[0.2, 0.1, 0.7]).unwrap()
}

/// A handful of well-formed distributions with different shapes.
pub fn assorted() -> Vec<DiscreteDistribution> {
    vec![
        interarrival(),
        service(),
        DiscreteDistribution::point_mass(0),
        DiscreteDistribution::point_mass(-7),
        DiscreteDistribution::uniform(-5, 5).unwrap(),
        DiscreteDistribution::geometric(0.3).unwrap(),
        DiscreteDistribution::binomial(12, 0.7).unwrap(),
        DiscreteDistribution::poisson(2.5).unwrap().shift(-3).unwrap(),
        DiscreteDistribution::new(&[-3, 0, 9], &[0.1, 0.6, 0.3]).unwrap(),
    ]
}

pub fn assert_unit_mass(d: &DiscreteDistribution) {
    assert!(
        (d.total_mass() - 1.0).abs() < 1e-9,
        "mass should be 1, got {} for {}",
        d.total_mass(),
        d
    );
}
