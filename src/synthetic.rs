//! Synthetic field data for tests, examples, and baseline comparisons.
//!
//! Generates sample points over a ~0.1-degree irrigation district footprint
//! with uniform agronomic readings and a 50/30/20 maize/tomato/chile mix,
//! deterministic under a fixed seed.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataset::{Crop, SamplePoint};
use crate::error::{Result, RiegoError};

/// Seeded generator for synthetic sample fields.
///
/// # Example
///
/// ```
/// use riego::synthetic::SyntheticField;
///
/// let dataset = SyntheticField::default()
///     .with_points(50)
///     .with_seed(42)
///     .generate()
///     .unwrap();
/// assert_eq!(dataset.len(), 50);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticField {
    /// Number of sample points to produce (default: 100).
    pub n_points: usize,
    /// Latitude range in decimal degrees.
    pub latitude: (f64, f64),
    /// Longitude range in decimal degrees.
    pub longitude: (f64, f64),
    /// Volumetric humidity range, percent.
    pub humidity: (f64, f64),
    /// Salinity range, dS/m.
    pub salinity: (f64, f64),
    /// Elevation range, meters.
    pub elevation: (f64, f64),
    /// Temperature range, degrees Celsius.
    pub temperature: (f64, f64),
    /// Crop mix weights aligned with [`Crop::ALL`].
    pub crop_mix: [f64; 3],
    /// Random seed for reproducibility.
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for SyntheticField {
    fn default() -> Self {
        Self {
            n_points: 100,
            latitude: (25.52, 25.62),
            longitude: (-108.52, -108.42),
            humidity: (5.0, 45.0),
            salinity: (0.5, 4.0),
            elevation: (10.0, 50.0),
            temperature: (20.0, 40.0),
            crop_mix: [0.5, 0.3, 0.2],
            seed: None,
        }
    }
}

impl SyntheticField {
    /// Set the number of points.
    #[must_use]
    pub fn with_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Set the crop mix weights (aligned with [`Crop::ALL`]).
    #[must_use]
    pub fn with_crop_mix(mut self, crop_mix: [f64; 3]) -> Self {
        self.crop_mix = crop_mix;
        self
    }

    /// Set the random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate the field.
    ///
    /// # Errors
    ///
    /// Returns [`RiegoError::InvalidHyperparameter`] for a zero point count,
    /// an inverted or non-finite range, or a crop mix without a positive sum.
    pub fn generate(&self) -> Result<Vec<SamplePoint>> {
        if self.n_points < 1 {
            return Err(RiegoError::invalid_hyperparameter(
                "n_points",
                self.n_points,
                ">= 1",
            ));
        }
        ensure_range("latitude", self.latitude)?;
        ensure_range("longitude", self.longitude)?;
        ensure_range("humidity", self.humidity)?;
        ensure_range("salinity", self.salinity)?;
        ensure_range("elevation", self.elevation)?;
        ensure_range("temperature", self.temperature)?;

        let crop_picker = WeightedIndex::new(self.crop_mix).map_err(|_| {
            RiegoError::invalid_hyperparameter(
                "crop_mix",
                format!("{:?}", self.crop_mix),
                "non-negative weights with a positive sum",
            )
        })?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut dataset = Vec::with_capacity(self.n_points);
        for _ in 0..self.n_points {
            let humidity = rng.gen_range(self.humidity.0..=self.humidity.1);
            let crop = Crop::ALL[crop_picker.sample(&mut rng)];
            let elevation = rng.gen_range(self.elevation.0..=self.elevation.1);
            let salinity = rng.gen_range(self.salinity.0..=self.salinity.1);
            let temperature = rng.gen_range(self.temperature.0..=self.temperature.1);
            let latitude = rng.gen_range(self.latitude.0..=self.latitude.1);
            let longitude = rng.gen_range(self.longitude.0..=self.longitude.1);
            dataset.push(SamplePoint {
                latitude,
                longitude,
                crop,
                humidity,
                salinity,
                elevation,
                temperature,
            });
        }
        Ok(dataset)
    }
}

fn ensure_range(param: &str, range: (f64, f64)) -> Result<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 > range.1 {
        return Err(RiegoError::invalid_hyperparameter(
            param,
            format!("({}, {})", range.0, range.1),
            "finite with min <= max",
        ));
    }
    Ok(())
}
