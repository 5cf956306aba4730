//! Immutable scoring configuration.
//!
//! All tunables live in an explicit [`ScoringConfig`] value handed to the
//! scoring engine and the optimizer at construction; there is no global
//! mutable state. Defaults reproduce the reference field study: radii and
//! spacing in coordinate degrees sized for a ~0.1-degree irrigation district.

use serde::{Deserialize, Serialize};

use crate::dataset::Crop;
use crate::error::{Result, RiegoError};

/// Weights combining the four sub-scores into the composite total.
///
/// The engine does not require the weights to sum to 1; callers that want a
/// total bounded by 1 keep them normalized, as the defaults are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight for spatial coverage.
    pub coverage: f64,
    /// Weight for crop-category balance.
    pub crop_balance: f64,
    /// Weight for critical-zone coverage.
    pub critical_zone: f64,
    /// Weight for inter-sensor spacing quality.
    pub distribution: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coverage: 0.35,
            crop_balance: 0.25,
            critical_zone: 0.25,
            distribution: 0.15,
        }
    }
}

/// Agronomic humidity band for one crop, in volumetric percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityBand {
    pub min: f64,
    pub max: f64,
}

/// Ideal humidity band per crop.
///
/// Reserved for irrigation recommendations; not consumed by the scoring
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityBands {
    pub maize: HumidityBand,
    pub tomato: HumidityBand,
    pub chile: HumidityBand,
}

impl HumidityBands {
    /// Band for a given crop category.
    #[must_use]
    pub fn band(&self, crop: Crop) -> HumidityBand {
        match crop {
            Crop::Maize => self.maize,
            Crop::Tomato => self.tomato,
            Crop::Chile => self.chile,
        }
    }
}

impl Default for HumidityBands {
    fn default() -> Self {
        Self {
            maize: HumidityBand {
                min: 30.0,
                max: 45.0,
            },
            tomato: HumidityBand {
                min: 25.0,
                max: 40.0,
            },
            chile: HumidityBand {
                min: 20.0,
                max: 35.0,
            },
        }
    }
}

/// Scoring engine configuration: radii, target spacing, and weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Radius of full coverage credit around a sensor (degrees).
    pub coverage_radius: f64,
    /// Radius within which a sensor counts toward crop-balance coverage.
    pub influence_radius: f64,
    /// Stricter radius required for critical-zone credit.
    pub critical_radius: f64,
    /// Target pairwise spacing between sensors.
    pub ideal_spacing: f64,
    /// Sub-score weights for the composite total.
    pub weights: ScoreWeights,
    /// Ideal humidity per crop (reserved, unused by scoring).
    pub humidity_bands: HumidityBands,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coverage_radius: 0.012,
            influence_radius: 0.018,
            critical_radius: 0.01,
            ideal_spacing: 0.025,
            weights: ScoreWeights::default(),
            humidity_bands: HumidityBands::default(),
        }
    }
}

impl ScoringConfig {
    /// Validate radii, spacing, and weights.
    ///
    /// # Errors
    ///
    /// Returns [`RiegoError::InvalidHyperparameter`] for any non-finite or
    /// non-positive radius/spacing, or any non-finite or negative weight.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("coverage_radius", self.coverage_radius)?;
        ensure_positive("influence_radius", self.influence_radius)?;
        ensure_positive("critical_radius", self.critical_radius)?;
        ensure_positive("ideal_spacing", self.ideal_spacing)?;
        ensure_weight("weights.coverage", self.weights.coverage)?;
        ensure_weight("weights.crop_balance", self.weights.crop_balance)?;
        ensure_weight("weights.critical_zone", self.weights.critical_zone)?;
        ensure_weight("weights.distribution", self.weights.distribution)?;
        Ok(())
    }
}

fn ensure_positive(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(RiegoError::invalid_hyperparameter(
            param,
            value,
            "finite and > 0",
        ));
    }
    Ok(())
}

fn ensure_weight(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RiegoError::invalid_hyperparameter(
            param,
            value,
            "finite and >= 0",
        ));
    }
    Ok(())
}
