use std::error::Error;

use lindley::{DiscreteDistribution, DistributionError, SolveError};

#[test]
fn distribution_error_reported_as_source() {
    let inner = DiscreteDistribution::new(&[1, 2], &[0.5, 0.6]).unwrap_err();
    let e = SolveError::from(inner.clone());

    let source = e.source().unwrap();
    assert_eq!(source.to_string(), inner.to_string());
    assert!(matches!(
        e,
        SolveError::Distribution(DistributionError::NotNormalised { .. })
    ));
}

#[test]
fn errors_are_descriptive() {
    let e = DistributionError::LengthMismatch {
        values: 3,
        probabilities: 2,
    };
    assert_eq!(e.to_string(), "Got 3 values but 2 probabilities");

    let e = SolveError::NotConverged {
        iterations: 10,
        last_mean: 40.0,
        drift: 4.0,
    };
    assert_eq!(
        e.to_string(),
        "Did not converge within 10 iterations (drift: 4, last mean: 40)"
    );
}
