//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use riego::prelude::*;
//! ```

pub use crate::baselines::{critical_zone_placement, crop_centroid_placement, random_placement};
pub use crate::config::{ScoreWeights, ScoringConfig};
pub use crate::dataset::{Crop, GeographicDomain, SamplePoint, SensorLocation};
pub use crate::error::{Result, RiegoError};
pub use crate::scoring::{score, ScoreBreakdown};
pub use crate::swarm::{ParticleSwarm, PlacementResult};
pub use crate::synthetic::SyntheticField;
