//! Composite placement scoring.
//!
//! Maps a sensor configuration and a dataset to a [`ScoreBreakdown`]: four
//! independently computable sub-scores in [0, 1] plus their weighted total.
//! The engine is a pure function of its inputs, with no hidden state, so the
//! optimizer and the baseline strategies both evaluate candidate placements
//! through the same code path.
//!
//! # Sub-scores
//!
//! ```text
//! coverage       mean per-point credit for proximity to the nearest sensor
//! crop_balance   how proportionally each crop category is covered
//! critical_zone  fraction of critical samples within the strict radius
//! distribution   how close pairwise sensor spacing is to the ideal
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::dataset::{Crop, SamplePoint, SensorLocation};
use crate::error::{Result, RiegoError};

/// Component scores plus the weighted composite.
///
/// Each component lies in [0, 1]; the total lies in [0, 1] whenever the
/// configured weights sum to at most 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub coverage: f64,
    pub crop_balance: f64,
    pub critical_zone: f64,
    pub distribution: f64,
    pub total: f64,
}

/// Score a sensor configuration against a dataset.
///
/// # Errors
///
/// Returns [`RiegoError::EmptyDataset`] for an empty dataset,
/// [`RiegoError::InvalidHyperparameter`] for an empty configuration or an
/// invalid [`ScoringConfig`].
pub fn score(
    sensors: &[SensorLocation],
    dataset: &[SamplePoint],
    config: &ScoringConfig,
) -> Result<ScoreBreakdown> {
    if dataset.is_empty() {
        return Err(RiegoError::EmptyDataset);
    }
    if sensors.is_empty() {
        return Err(RiegoError::invalid_hyperparameter(
            "sensors",
            sensors.len(),
            "at least one sensor location",
        ));
    }
    config.validate()?;
    Ok(breakdown(sensors, dataset, config))
}

/// Fast path for callers that validated inputs once up front.
pub(crate) fn breakdown(
    sensors: &[SensorLocation],
    dataset: &[SamplePoint],
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let coverage = coverage(sensors, dataset, config.coverage_radius);
    let crop_balance = crop_balance(sensors, dataset, config.influence_radius);
    let critical_zone = critical_zone(sensors, dataset, config.critical_radius);
    let distribution = distribution(sensors, config.ideal_spacing);

    let w = &config.weights;
    let total = w.coverage * coverage
        + w.crop_balance * crop_balance
        + w.critical_zone * critical_zone
        + w.distribution * distribution;

    ScoreBreakdown {
        coverage,
        crop_balance,
        critical_zone,
        distribution,
        total,
    }
}

/// Spatial coverage of the sampled area.
///
/// Each sample point earns credit 1 when its nearest sensor is within
/// `radius`, decaying linearly by `(d - radius) / (2 * radius)` beyond it and
/// floored at 0 (so credit runs out three radii from the sensor). The score
/// is the mean credit over all sample points.
///
/// Requires a non-empty dataset; [`score`] enforces this for callers.
#[must_use]
pub fn coverage(sensors: &[SensorLocation], dataset: &[SamplePoint], radius: f64) -> f64 {
    let credit: f64 = dataset
        .iter()
        .map(|point| {
            let nearest = nearest_sensor_distance(sensors, point);
            if nearest <= radius {
                1.0
            } else {
                (1.0 - (nearest - radius) / (2.0 * radius)).max(0.0)
            }
        })
        .sum();
    credit / dataset.len() as f64
}

/// Balance of coverage across crop categories.
///
/// For each category, the ideal share is its fraction of the dataset and the
/// real coverage is the fraction of its points within `radius` of any
/// sensor; the per-crop score is `1 - |ideal - real|`, capped at 1. The
/// result averages the categories present in the dataset: a category with
/// zero members is skipped rather than dividing by zero.
#[must_use]
pub fn crop_balance(sensors: &[SensorLocation], dataset: &[SamplePoint], radius: f64) -> f64 {
    let total = dataset.len() as f64;
    let mut sum = 0.0;
    let mut present = 0usize;

    for crop in Crop::ALL {
        let mut count = 0usize;
        let mut covered = 0usize;
        for point in dataset.iter().filter(|p| p.crop == crop) {
            count += 1;
            if nearest_sensor_distance(sensors, point) <= radius {
                covered += 1;
            }
        }
        if count == 0 {
            continue;
        }
        let ideal_share = count as f64 / total;
        let real_coverage = covered as f64 / count as f64;
        sum += (1.0 - (ideal_share - real_coverage).abs()).min(1.0);
        present += 1;
    }

    sum / present as f64
}

/// Coverage of critical zones.
///
/// A sample is critical per [`SamplePoint::is_critical`] (extreme salinity
/// or humidity). With no critical samples the score is vacuously 1;
/// otherwise it is the fraction of critical samples within `radius` (a
/// stricter bar than the coverage radius) of any sensor.
#[must_use]
pub fn critical_zone(sensors: &[SensorLocation], dataset: &[SamplePoint], radius: f64) -> f64 {
    let mut critical = 0usize;
    let mut covered = 0usize;
    for point in dataset.iter().filter(|p| p.is_critical()) {
        critical += 1;
        if nearest_sensor_distance(sensors, point) <= radius {
            covered += 1;
        }
    }
    if critical == 0 {
        return 1.0;
    }
    covered as f64 / critical as f64
}

/// Spacing quality of the sensor layout.
///
/// Each unordered sensor pair earns credit 1 when its distance lies within
/// ±30% of `ideal_spacing`, decaying linearly with the normalized deviation
/// `|d - ideal| / ideal` otherwise, floored at 0. The score is the mean over
/// all pairs; with fewer than two sensors it is vacuously 1.
///
/// # Example
///
/// ```
/// use riego::dataset::SensorLocation;
/// use riego::scoring::distribution;
///
/// let sensors = vec![
///     SensorLocation::new(0.0, 0.0),
///     SensorLocation::new(0.0, 0.025),
/// ];
/// assert!((distribution(&sensors, 0.025) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn distribution(sensors: &[SensorLocation], ideal_spacing: f64) -> f64 {
    if sensors.len() < 2 {
        return 1.0;
    }

    let mut credit = 0.0;
    let mut pairs = 0usize;
    for i in 0..sensors.len() {
        for j in (i + 1)..sensors.len() {
            let d = sensors[i].distance_to(sensors[j].latitude, sensors[j].longitude);
            credit += if d >= 0.7 * ideal_spacing && d <= 1.3 * ideal_spacing {
                1.0
            } else {
                (1.0 - (d - ideal_spacing).abs() / ideal_spacing).max(0.0)
            };
            pairs += 1;
        }
    }

    credit / pairs as f64
}

fn nearest_sensor_distance(sensors: &[SensorLocation], point: &SamplePoint) -> f64 {
    sensors
        .iter()
        .map(|s| s.distance_to(point.latitude, point.longitude))
        .fold(f64::INFINITY, f64::min)
}
