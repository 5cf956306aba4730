//! Particle swarm placement optimizer.
//!
//! # Algorithm
//!
//! Each particle encodes one sensor configuration as a flattened
//! `[lat1, lon1, ..., latN, lonN]` vector. Per iteration:
//!
//! ```text
//! 1. Evaluate every particle at its current position.
//! 2. Update personal bests, then the global best (strict >, so the
//!    first particle to reach a score keeps the tie).
//! 3. Per particle, draw r1, r2 once and move every component:
//!      v' = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)
//!    with v' clamped to [-v_max, v_max] and x' = x + v' hard-clamped
//!    to the geographic domain.
//! 4. Append the global-best score to the history.
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995): "Particle Swarm Optimization"
//! - Shi & Eberhart (1998): "A Modified Particle Swarm Optimizer"

use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::dataset::{GeographicDomain, SamplePoint, SensorLocation};
use crate::error::{Result, RiegoError};
use crate::scoring;

/// Initial velocities are drawn from this symmetric interval, well below the
/// default velocity limit, so the swarm starts in a slow drift.
const INITIAL_VELOCITY_SPAN: f64 = 0.001;

/// One candidate placement with its velocity and personal best.
#[derive(Debug, Clone)]
struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_score: f64,
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Best sensor configuration found.
    pub sensors: Vec<SensorLocation>,
    /// Composite score of `sensors`.
    pub best_score: f64,
    /// Objective evaluations consumed across the run.
    pub evaluations: usize,
    /// Iterations executed (always the full budget).
    pub iterations: usize,
    /// Global-best score after each iteration.
    pub history: Vec<f64>,
}

/// Particle swarm optimizer for sensor placement.
///
/// Search bounds are derived from the dataset extrema at the start of every
/// run; swarm state lives only for the duration of that run. A fixed seed
/// makes the run reproducible bit-for-bit.
///
/// # Example
///
/// ```
/// use riego::swarm::ParticleSwarm;
/// use riego::synthetic::SyntheticField;
///
/// let dataset = SyntheticField::default()
///     .with_points(40)
///     .with_seed(7)
///     .generate()
///     .unwrap();
///
/// let mut pso = ParticleSwarm::new(3)
///     .with_swarm_size(12)
///     .with_iterations(25)
///     .with_seed(42);
/// let result = pso.optimize(&dataset).unwrap();
///
/// assert_eq!(result.sensors.len(), 3);
/// assert_eq!(result.history.len(), 25);
/// assert!(result.best_score > 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSwarm {
    /// Number of sensors to place (default: 5).
    pub n_sensors: usize,

    /// Number of particles in the swarm (default: 30).
    pub swarm_size: usize,

    /// Iteration budget; the run always exhausts it (default: 100).
    pub iterations: usize,

    /// Inertia weight w (default: 0.7).
    pub inertia: f64,

    /// Cognitive coefficient c1, attraction to a particle's own best
    /// (default: 1.5).
    pub cognitive: f64,

    /// Social coefficient c2, attraction to the swarm best (default: 1.5).
    pub social: f64,

    /// Per-component velocity limit (default: 0.005).
    pub max_velocity: f64,

    /// Scoring configuration every particle is evaluated against.
    pub scoring: ScoringConfig,

    /// Evaluate particles across a rayon worker pool. Scores land in an
    /// index-aligned vector before the sequential best-update reduction, so
    /// results are identical to the sequential path (default: false).
    pub parallel: bool,

    /// Random seed for reproducibility.
    #[serde(default)]
    seed: Option<u64>,

    // Run state, rebuilt by every optimize() call.
    #[serde(skip)]
    particles: Vec<Particle>,
    #[serde(skip)]
    global_best: Vec<f64>,
    #[serde(skip)]
    global_best_score: f64,
    #[serde(skip)]
    history: Vec<f64>,
}

impl Default for ParticleSwarm {
    fn default() -> Self {
        Self {
            n_sensors: 5,
            swarm_size: 30,
            iterations: 100,
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            max_velocity: 0.005,
            scoring: ScoringConfig::default(),
            parallel: false,
            seed: None,
            particles: Vec::new(),
            global_best: Vec::new(),
            global_best_score: f64::NEG_INFINITY,
            history: Vec::new(),
        }
    }
}

impl ParticleSwarm {
    /// Create an optimizer placing `n_sensors` sensors, with default
    /// hyperparameters.
    #[must_use]
    pub fn new(n_sensors: usize) -> Self {
        Self {
            n_sensors,
            ..Self::default()
        }
    }

    /// Set the swarm size M.
    #[must_use]
    pub fn with_swarm_size(mut self, swarm_size: usize) -> Self {
        self.swarm_size = swarm_size;
        self
    }

    /// Set the iteration budget T.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the inertia weight w.
    #[must_use]
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Set the cognitive coefficient c1.
    #[must_use]
    pub fn with_cognitive(mut self, cognitive: f64) -> Self {
        self.cognitive = cognitive;
        self
    }

    /// Set the social coefficient c2.
    #[must_use]
    pub fn with_social(mut self, social: f64) -> Self {
        self.social = social;
        self
    }

    /// Set the per-component velocity limit.
    #[must_use]
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set the scoring configuration.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Evaluate particles on a rayon worker pool.
    #[must_use]
    pub fn with_parallel_evaluation(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the optimization against a dataset.
    ///
    /// Executes exactly `iterations` swarm updates and returns the best
    /// configuration seen, its score, and the per-iteration history.
    ///
    /// # Errors
    ///
    /// Returns [`RiegoError::EmptyDataset`] for an empty dataset,
    /// [`RiegoError::DegenerateDomain`] when every sample carries identical
    /// coordinates, and [`RiegoError::InvalidHyperparameter`] for a
    /// non-positive sensor count, swarm size, or iteration budget, or for
    /// malformed coefficients, velocity limit, or scoring configuration.
    pub fn optimize(&mut self, dataset: &[SamplePoint]) -> Result<PlacementResult> {
        self.validate(dataset)?;
        let domain = GeographicDomain::from_samples(dataset)?;

        self.reset();
        let mut rng = self.make_rng();
        self.initialize(&domain, dataset, &mut rng);
        let mut evaluations = self.particles.len();

        for _ in 0..self.iterations {
            // Evaluate-before-move: every particle is rescored at its
            // current position each iteration, even right after init.
            let scores = self.evaluate_all(dataset);
            evaluations += scores.len();

            self.update_bests(&scores);
            self.move_particles(&domain, &mut rng);
            self.history.push(self.global_best_score);
        }

        Ok(PlacementResult {
            sensors: SensorLocation::from_flat(&self.global_best),
            best_score: self.global_best_score,
            evaluations,
            iterations: self.iterations,
            history: self.history.clone(),
        })
    }

    /// Best configuration seen so far, if a run has been performed.
    #[must_use]
    pub fn best(&self) -> Option<Vec<SensorLocation>> {
        if self.global_best.is_empty() {
            None
        } else {
            Some(SensorLocation::from_flat(&self.global_best))
        }
    }

    /// Global-best score after each iteration of the last run.
    #[must_use]
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Discard the state of the previous run.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.global_best.clear();
        self.global_best_score = f64::NEG_INFINITY;
        self.history.clear();
    }

    /// Create RNG from seed or entropy.
    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn validate(&self, dataset: &[SamplePoint]) -> Result<()> {
        if dataset.is_empty() {
            return Err(RiegoError::EmptyDataset);
        }
        ensure_at_least("n_sensors", self.n_sensors, 1)?;
        ensure_at_least("swarm_size", self.swarm_size, 1)?;
        ensure_at_least("iterations", self.iterations, 1)?;
        ensure_coefficient("inertia", self.inertia)?;
        ensure_coefficient("cognitive", self.cognitive)?;
        ensure_coefficient("social", self.social)?;
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(RiegoError::invalid_hyperparameter(
                "max_velocity",
                self.max_velocity,
                "finite and > 0",
            ));
        }
        self.scoring.validate()
    }

    /// Seed the swarm: uniform positions within bounds, a slow initial
    /// drift, and personal/global bests from the initial evaluation.
    fn initialize(&mut self, domain: &GeographicDomain, dataset: &[SamplePoint], rng: &mut StdRng) {
        let dim = 2 * self.n_sensors;

        for _ in 0..self.swarm_size {
            let mut position = Vec::with_capacity(dim);
            for _ in 0..self.n_sensors {
                position.push(rng.gen_range(domain.lat_min..=domain.lat_max));
                position.push(rng.gen_range(domain.lon_min..=domain.lon_max));
            }
            self.particles.push(Particle {
                best_position: position.clone(),
                position,
                velocity: vec![0.0; dim],
                best_score: f64::NEG_INFINITY,
            });
        }

        // Never let the initial drift exceed a caller's tighter velocity limit.
        let span = INITIAL_VELOCITY_SPAN.min(self.max_velocity);
        for particle in &mut self.particles {
            for component in &mut particle.velocity {
                *component = rng.gen_range(-span..=span);
            }
        }

        let scores = self.evaluate_all(dataset);
        for (particle, &score) in self.particles.iter_mut().zip(&scores) {
            particle.best_score = score;
        }
        for (i, &score) in scores.iter().enumerate() {
            if score > self.global_best_score {
                self.global_best_score = score;
                self.global_best = self.particles[i].position.clone();
            }
        }
    }

    /// Score every particle at its current position, in particle order.
    fn evaluate_all(&self, dataset: &[SamplePoint]) -> Vec<f64> {
        if self.parallel {
            self.particles
                .par_iter()
                .map(|particle| self.evaluate(particle, dataset))
                .collect()
        } else {
            self.particles
                .iter()
                .map(|particle| self.evaluate(particle, dataset))
                .collect()
        }
    }

    fn evaluate(&self, particle: &Particle, dataset: &[SamplePoint]) -> f64 {
        let sensors = SensorLocation::from_flat(&particle.position);
        scoring::breakdown(&sensors, dataset, &self.scoring).total
    }

    /// Strict-improvement best updates: ties never replace, so the first
    /// particle index to reach a score wins regardless of evaluation order.
    fn update_bests(&mut self, scores: &[f64]) {
        for (particle, &score) in self.particles.iter_mut().zip(scores) {
            if score > particle.best_score {
                particle.best_score = score;
                particle.best_position = particle.position.clone();
            }
            if score > self.global_best_score {
                self.global_best_score = score;
                self.global_best = particle.position.clone();
            }
        }
    }

    /// Velocity and position updates with velocity clamping and hard domain
    /// clamping. One (r1, r2) pair per particle, shared across components.
    fn move_particles(&mut self, domain: &GeographicDomain, rng: &mut StdRng) {
        let global_best = self.global_best.clone();

        for particle in &mut self.particles {
            let r1: f64 = rng.gen();
            let r2: f64 = rng.gen();

            for j in 0..particle.position.len() {
                let momentum = self.inertia * particle.velocity[j];
                let cognitive =
                    self.cognitive * r1 * (particle.best_position[j] - particle.position[j]);
                let social = self.social * r2 * (global_best[j] - particle.position[j]);

                let velocity =
                    (momentum + cognitive + social).clamp(-self.max_velocity, self.max_velocity);
                particle.velocity[j] = velocity;
                particle.position[j] += velocity;
            }

            domain.clamp_position(&mut particle.position);
        }
    }
}

fn ensure_at_least(param: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(RiegoError::invalid_hyperparameter(
            param,
            value,
            &format!(">= {min}"),
        ));
    }
    Ok(())
}

fn ensure_coefficient(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RiegoError::invalid_hyperparameter(
            param,
            value,
            "finite and >= 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Crop;

    fn grid_dataset() -> Vec<SamplePoint> {
        let mut dataset = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                dataset.push(SamplePoint {
                    latitude: 25.52 + 0.02 * f64::from(i),
                    longitude: -108.52 + 0.02 * f64::from(j),
                    crop: Crop::ALL[(i as usize + j as usize) % 3],
                    humidity: 30.0,
                    salinity: 1.0,
                    elevation: 20.0,
                    temperature: 25.0,
                });
            }
        }
        dataset
    }

    #[test]
    fn test_builder_sets_fields() {
        let pso = ParticleSwarm::new(4)
            .with_swarm_size(20)
            .with_iterations(50)
            .with_inertia(0.6)
            .with_cognitive(1.2)
            .with_social(1.8)
            .with_max_velocity(0.01)
            .with_parallel_evaluation(true)
            .with_seed(123);
        assert_eq!(pso.n_sensors, 4);
        assert_eq!(pso.swarm_size, 20);
        assert_eq!(pso.iterations, 50);
        assert!((pso.inertia - 0.6).abs() < 1e-12);
        assert!((pso.cognitive - 1.2).abs() < 1e-12);
        assert!((pso.social - 1.8).abs() < 1e-12);
        assert!((pso.max_velocity - 0.01).abs() < 1e-12);
        assert!(pso.parallel);
    }

    #[test]
    fn test_empty_before_optimize() {
        let pso = ParticleSwarm::new(3);
        assert!(pso.best().is_none());
        assert!(pso.history().is_empty());
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let mut pso = ParticleSwarm::new(3).with_seed(1);
        assert!(matches!(
            pso.optimize(&[]),
            Err(RiegoError::EmptyDataset)
        ));
    }

    #[test]
    fn test_rejects_nonpositive_counts() {
        let dataset = grid_dataset();

        let mut pso = ParticleSwarm::new(0).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());

        let mut pso = ParticleSwarm::new(2).with_swarm_size(0).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());

        let mut pso = ParticleSwarm::new(2).with_iterations(0).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());
    }

    #[test]
    fn test_rejects_malformed_hyperparameters() {
        let dataset = grid_dataset();

        let mut pso = ParticleSwarm::new(2).with_inertia(f64::NAN).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());

        let mut pso = ParticleSwarm::new(2).with_max_velocity(0.0).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());

        let mut pso = ParticleSwarm::new(2).with_social(-1.0).with_seed(1);
        assert!(pso.optimize(&dataset).is_err());
    }

    #[test]
    fn test_rejects_degenerate_domain() {
        let point = SamplePoint {
            latitude: 25.5,
            longitude: -108.5,
            crop: Crop::Maize,
            humidity: 30.0,
            salinity: 1.0,
            elevation: 20.0,
            temperature: 25.0,
        };
        let dataset = vec![point.clone(), point];
        let mut pso = ParticleSwarm::new(2).with_seed(1);
        assert!(matches!(
            pso.optimize(&dataset),
            Err(RiegoError::DegenerateDomain { .. })
        ));
    }

    #[test]
    fn test_evaluation_count_and_history_length() {
        let dataset = grid_dataset();
        let mut pso = ParticleSwarm::new(2)
            .with_swarm_size(8)
            .with_iterations(15)
            .with_seed(7);
        let result = pso.optimize(&dataset).expect("valid run");

        // One sweep to seed bests, then one per iteration.
        assert_eq!(result.evaluations, 8 * (15 + 1));
        assert_eq!(result.iterations, 15);
        assert_eq!(result.history.len(), 15);
        assert_eq!(result.sensors.len(), 2);
    }

    #[test]
    fn test_best_and_history_populated_after_run() {
        let dataset = grid_dataset();
        let mut pso = ParticleSwarm::new(2)
            .with_swarm_size(6)
            .with_iterations(10)
            .with_seed(3);
        let result = pso.optimize(&dataset).expect("valid run");

        let best = pso.best().expect("best after run");
        assert_eq!(best.len(), 2);
        assert_eq!(pso.history().len(), 10);
        assert!((pso.history()[9] - result.best_score).abs() < 1e-15);
    }

    #[test]
    fn test_reset_clears_state() {
        let dataset = grid_dataset();
        let mut pso = ParticleSwarm::new(2)
            .with_swarm_size(6)
            .with_iterations(5)
            .with_seed(3);
        let _ = pso.optimize(&dataset).expect("valid run");
        assert!(pso.best().is_some());

        pso.reset();
        assert!(pso.best().is_none());
        assert!(pso.history().is_empty());
    }

    #[test]
    fn test_consecutive_runs_with_same_seed_match() {
        let dataset = grid_dataset();
        let mut pso = ParticleSwarm::new(3)
            .with_swarm_size(10)
            .with_iterations(12)
            .with_seed(99);

        let first = pso.optimize(&dataset).expect("valid run");
        let second = pso.optimize(&dataset).expect("valid run");

        assert_eq!(first.best_score.to_bits(), second.best_score.to_bits());
        assert_eq!(first.history, second.history);
        assert_eq!(first.sensors, second.sensors);
    }
}
