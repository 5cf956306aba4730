//! End-to-end determinism and serialization tests.
//!
//! A placement run must be reproducible bit-for-bit from (dataset,
//! hyperparameters, seed): the optimizer owns a single explicitly seeded
//! generator and consumes it in a fixed order, so no ambient randomness can
//! leak into a run.

use riego::prelude::*;

fn survey_field(seed: u64) -> Vec<SamplePoint> {
    SyntheticField::default()
        .with_points(80)
        .with_seed(seed)
        .generate()
        .expect("synthetic field")
}

/// Same dataset, hyperparameters, and seed: identical output, bit for bit.
#[test]
fn identical_runs_reproduce_exactly() {
    let dataset = survey_field(100);

    let run = |parallel: bool| {
        let mut pso = ParticleSwarm::new(5)
            .with_swarm_size(20)
            .with_iterations(35)
            .with_parallel_evaluation(parallel)
            .with_seed(2024);
        pso.optimize(&dataset).expect("valid run")
    };

    let first = run(false);
    let second = run(false);
    let parallel = run(true);

    assert_eq!(first.best_score.to_bits(), second.best_score.to_bits());
    assert_eq!(first.sensors, second.sensors);
    assert_eq!(first.history, second.history);

    // The worker-pool evaluation path reduces in particle order and must be
    // indistinguishable from the sequential one.
    assert_eq!(first.best_score.to_bits(), parallel.best_score.to_bits());
    assert_eq!(first.sensors, parallel.sensors);
    assert_eq!(first.history, parallel.history);
}

/// Different seeds explore differently.
#[test]
fn different_seeds_diverge() {
    let dataset = survey_field(100);

    let mut a = ParticleSwarm::new(4)
        .with_swarm_size(12)
        .with_iterations(20)
        .with_seed(1);
    let mut b = ParticleSwarm::new(4)
        .with_swarm_size(12)
        .with_iterations(20)
        .with_seed(2);

    let result_a = a.optimize(&dataset).expect("valid run");
    let result_b = b.optimize(&dataset).expect("valid run");
    assert_ne!(result_a.sensors, result_b.sensors);
}

/// Optimizer and scoring configuration survive a JSON round-trip; a restored
/// optimizer reproduces the original run.
#[test]
fn optimizer_roundtrips_through_json() {
    let dataset = survey_field(7);

    let mut original = ParticleSwarm::new(3)
        .with_swarm_size(10)
        .with_iterations(15)
        .with_inertia(0.6)
        .with_max_velocity(0.004)
        .with_seed(99);

    let json = serde_json::to_string(&original).expect("serialize optimizer");
    let mut restored: ParticleSwarm = serde_json::from_str(&json).expect("deserialize optimizer");

    assert_eq!(restored.n_sensors, 3);
    assert_eq!(restored.swarm_size, 10);
    assert_eq!(restored.iterations, 15);
    assert!((restored.inertia - 0.6).abs() < 1e-12);
    assert!((restored.max_velocity - 0.004).abs() < 1e-12);

    let a = original.optimize(&dataset).expect("valid run");
    let b = restored.optimize(&dataset).expect("valid run");
    assert_eq!(a.sensors, b.sensors);
    assert_eq!(a.history, b.history);
}

#[test]
fn scoring_config_roundtrips_through_json() {
    let config = ScoringConfig::default();
    let json = serde_json::to_string(&config).expect("serialize config");
    let restored: ScoringConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(config, restored);
}

/// The full comparison pipeline: baselines and the optimizer evaluated
/// through the same scoring engine.
#[test]
fn baselines_and_optimizer_share_the_scoring_engine() {
    let dataset = survey_field(55);
    let config = ScoringConfig::default();
    let n_sensors = 5;

    let candidates = vec![
        random_placement(n_sensors, &dataset, 10).expect("random baseline"),
        crop_centroid_placement(n_sensors, &dataset, 10).expect("centroid baseline"),
        critical_zone_placement(n_sensors, &dataset, 10).expect("critical baseline"),
    ];

    for sensors in &candidates {
        assert_eq!(sensors.len(), n_sensors);
        let breakdown = score(sensors, &dataset, &config).expect("scored baseline");
        assert!(breakdown.total >= 0.0 && breakdown.total <= 1.0);
    }

    let mut pso = ParticleSwarm::new(n_sensors)
        .with_swarm_size(15)
        .with_iterations(30)
        .with_seed(10);
    let result = pso.optimize(&dataset).expect("valid run");

    // The returned score is exactly what the public engine reports for the
    // returned configuration.
    let rescored = score(&result.sensors, &dataset, &config).expect("rescore");
    assert!((rescored.total - result.best_score).abs() < 1e-12);
}
