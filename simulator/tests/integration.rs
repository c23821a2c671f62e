use lindley::{DistributionError, SolverConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use simulator::reporter::{ReporterConfig, SimulationReporter};
use simulator::scenario::{Input, ScenarioConfig, ScenarioError, ScenarioRunner};
use simulator::simulation::SimulationConfig;
use std::sync::LazyLock;

static TEST_SEED: LazyLock<u64> = LazyLock::new(|| {
    let seed = StdRng::from_os_rng().next_u64();
    println!("Using test seed: {}", seed);
    seed
});

#[test]
fn test_simulation_agrees_with_solver() {
    let seed = *TEST_SEED;

    let config = ScenarioConfig {
        simulation: Some(
            SimulationConfig::builder()
                .samples(200_000)
                .seed(seed)
                .build(),
        ),
        ..ScenarioConfig::reference()
    };
    let outcome = ScenarioRunner::new(config).run().unwrap();

    let solved = outcome.steady_state.distribution();
    let simulated = outcome.simulated.expect("simulation was configured");

    println!("Solved:    mean {:.4}, P(W=0) {:.4}", solved.mean(), solved.pmf(0));
    println!(
        "Simulated: mean {:.4}, P(W=0) {:.4}",
        simulated.mean(),
        simulated.pmf(0)
    );

    // Successive waiting times are correlated, so the Monte Carlo error is several times the
    // i.i.d. standard error.
    assert!(
        (simulated.mean() - solved.mean()).abs() < 0.12,
        "Simulated mean {:.4} should be close to solved mean {:.4}",
        simulated.mean(),
        solved.mean()
    );
    assert!(
        (simulated.pmf(0) - solved.pmf(0)).abs() < 0.03,
        "Simulated P(W=0) {:.4} should be close to solved {:.4}",
        simulated.pmf(0),
        solved.pmf(0)
    );
}

#[test]
fn test_lightly_loaded_queue_rarely_waits() {
    let seed = *TEST_SEED;

    let config = ScenarioConfig {
        name: "light".to_string(),
        interarrival: vec![(3, 0.5), (5, 0.5)],
        service: vec![(1, 0.9), (4, 0.1)],
        solver: SolverConfig::default(),
        simulation: Some(
            SimulationConfig::builder()
                .warmup(100)
                .samples(50_000)
                .seed(seed)
                .build(),
        ),
    };
    let outcome = ScenarioRunner::new(config).run().unwrap();

    // Waiting needs a service of 4 followed by an arrival 3 slots later, so each extra slot
    // of waiting is about 20 times less likely.
    let solved = outcome.steady_state.distribution();
    assert!((solved.pmf(0) - 0.9498).abs() < 1e-3);
    assert!((solved.pmf(1) - 0.0477).abs() < 1e-3);
    assert!(solved.pmf(2) < solved.pmf(1) / 10.0);

    let simulated = outcome.simulated.unwrap();
    assert!((simulated.pmf(0) - solved.pmf(0)).abs() < 0.01);
}

#[test]
fn test_invalid_distribution_is_reported() {
    let config = ScenarioConfig {
        interarrival: vec![(4, 0.5), (8, -0.5), (20, 1.0)],
        ..ScenarioConfig::reference()
    };
    let err = ScenarioRunner::new(config).run().unwrap_err();

    match err {
        ScenarioError::InvalidDistribution { which, source } => {
            assert_eq!(which, Input::Interarrival);
            assert!(matches!(
                source,
                DistributionError::NegativeProbability { value: 8, .. }
            ));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test]
fn test_report_summary() {
    let config = ScenarioConfig {
        name: "summary-check".to_string(),
        simulation: Some(
            SimulationConfig::builder()
                .samples(10_000)
                .seed(*TEST_SEED)
                .build(),
        ),
        ..ScenarioConfig::reference()
    };
    let runner = ScenarioRunner::new(config);
    let outcome = runner.run().unwrap();

    let reporter = SimulationReporter::new(
        &outcome,
        runner.config(),
        ReporterConfig {
            output_dir: "tests/output/test_report_summary".into(),
            templates_dir: "templates".into(),
        },
    );

    let summary = reporter.summary();
    println!("{summary}");
    assert!(summary.contains("summary-check"));
    assert!(summary.contains("=== Monte Carlo ==="));
    assert!(summary.contains("Iterations:"));
}
