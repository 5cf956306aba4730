//! Riego: particle swarm placement of irrigation sensors.
//!
//! Riego selects positions for a fixed number of field sensors over the
//! rectangular domain spanned by a crop sampling dataset, maximizing a
//! composite score that blends spatial coverage, crop-category balance,
//! critical-zone coverage, and inter-sensor spacing quality.
//!
//! # Quick Start
//!
//! ```
//! use riego::prelude::*;
//!
//! // A seeded synthetic field stands in for survey data.
//! let dataset = SyntheticField::default()
//!     .with_points(60)
//!     .with_seed(7)
//!     .generate()
//!     .unwrap();
//!
//! // Place 4 sensors with a 20-particle swarm over 30 iterations.
//! let mut pso = ParticleSwarm::new(4)
//!     .with_swarm_size(20)
//!     .with_iterations(30)
//!     .with_seed(42);
//! let result = pso.optimize(&dataset).unwrap();
//!
//! assert_eq!(result.sensors.len(), 4);
//! assert!(result.best_score > 0.0 && result.best_score <= 1.0);
//!
//! // Compare against a fixed baseline through the same scoring engine.
//! let baseline = random_placement(4, &dataset, 42).unwrap();
//! let breakdown = score(&baseline, &dataset, &ScoringConfig::default()).unwrap();
//! assert!(breakdown.total <= 1.0);
//! ```
//!
//! # Modules
//!
//! - [`dataset`]: Sample records, crop categories, and the geographic domain
//! - [`config`]: Immutable scoring configuration (radii, spacing, weights)
//! - [`scoring`]: The four sub-scores and the weighted composite
//! - [`swarm`]: The particle swarm optimizer and its run result
//! - [`baselines`]: Fixed placement strategies for comparison
//! - [`synthetic`]: Seeded synthetic field generation

pub mod baselines;
pub mod config;
pub mod dataset;
pub mod error;
pub mod prelude;
pub mod scoring;
pub mod swarm;
pub mod synthetic;

pub use config::{ScoreWeights, ScoringConfig};
pub use dataset::{Crop, GeographicDomain, SamplePoint, SensorLocation};
pub use error::{Result, RiegoError};
pub use scoring::{score, ScoreBreakdown};
pub use swarm::{ParticleSwarm, PlacementResult};
pub use synthetic::SyntheticField;
