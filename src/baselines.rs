//! Fixed placement strategies used as comparison baselines.
//!
//! Each strategy produces a sensor configuration for the scoring engine to
//! evaluate next to an optimized run. The optimizer never consumes these.

use std::cmp::Ordering;

use rand::prelude::*;

use crate::dataset::{Crop, GeographicDomain, SamplePoint, SensorLocation};
use crate::error::{Result, RiegoError};

/// Jitter half-width around crop centroids (degrees).
const CENTROID_JITTER: f64 = 0.005;

/// Place sensors uniformly at random within the dataset bounds.
///
/// # Errors
///
/// Rejects an empty dataset, a zero sensor count, and a degenerate domain.
pub fn random_placement(
    n_sensors: usize,
    dataset: &[SamplePoint],
    seed: u64,
) -> Result<Vec<SensorLocation>> {
    validate(n_sensors, dataset)?;
    let domain = GeographicDomain::from_samples(dataset)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(draw_random(n_sensors, &domain, &mut rng))
}

/// Place sensors on the per-crop centers of mass, then fill with jittered
/// variants (±0.005 degrees) of randomly chosen centroids.
///
/// Categories with no samples are skipped. When fewer sensors than present
/// categories are requested, the centroid list is truncated in canonical
/// crop order.
///
/// # Errors
///
/// Rejects an empty dataset and a zero sensor count.
pub fn crop_centroid_placement(
    n_sensors: usize,
    dataset: &[SamplePoint],
    seed: u64,
) -> Result<Vec<SensorLocation>> {
    validate(n_sensors, dataset)?;

    let mut centroids = Vec::new();
    for crop in Crop::ALL {
        let mut count = 0usize;
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        for point in dataset.iter().filter(|p| p.crop == crop) {
            count += 1;
            lat_sum += point.latitude;
            lon_sum += point.longitude;
        }
        if count > 0 {
            centroids.push(SensorLocation::new(
                lat_sum / count as f64,
                lon_sum / count as f64,
            ));
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sensors = centroids.clone();
    while sensors.len() < n_sensors {
        let pick = rng.gen_range(0..centroids.len());
        let lat_jitter = rng.gen_range(-CENTROID_JITTER..=CENTROID_JITTER);
        let lon_jitter = rng.gen_range(-CENTROID_JITTER..=CENTROID_JITTER);
        sensors.push(SensorLocation::new(
            centroids[pick].latitude + lat_jitter,
            centroids[pick].longitude + lon_jitter,
        ));
    }
    sensors.truncate(n_sensors);
    Ok(sensors)
}

/// Place sensors on the most critical sample locations, ordered by
/// descending salinity; when there are fewer critical samples than sensors,
/// fill the remainder uniformly at random within the dataset bounds.
///
/// # Errors
///
/// Rejects an empty dataset and a zero sensor count; the random fill also
/// rejects a degenerate domain.
pub fn critical_zone_placement(
    n_sensors: usize,
    dataset: &[SamplePoint],
    seed: u64,
) -> Result<Vec<SensorLocation>> {
    validate(n_sensors, dataset)?;

    let mut critical: Vec<&SamplePoint> = dataset.iter().filter(|p| p.is_critical()).collect();
    critical.sort_by(|a, b| {
        b.salinity
            .partial_cmp(&a.salinity)
            .unwrap_or(Ordering::Equal)
    });

    let mut sensors: Vec<SensorLocation> = critical
        .iter()
        .take(n_sensors)
        .map(|p| SensorLocation::new(p.latitude, p.longitude))
        .collect();

    if sensors.len() < n_sensors {
        let domain = GeographicDomain::from_samples(dataset)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let fill = draw_random(n_sensors - sensors.len(), &domain, &mut rng);
        sensors.extend(fill);
    }

    Ok(sensors)
}

fn draw_random(n: usize, domain: &GeographicDomain, rng: &mut StdRng) -> Vec<SensorLocation> {
    (0..n)
        .map(|_| {
            SensorLocation::new(
                rng.gen_range(domain.lat_min..=domain.lat_max),
                rng.gen_range(domain.lon_min..=domain.lon_max),
            )
        })
        .collect()
}

fn validate(n_sensors: usize, dataset: &[SamplePoint]) -> Result<()> {
    if dataset.is_empty() {
        return Err(RiegoError::EmptyDataset);
    }
    if n_sensors < 1 {
        return Err(RiegoError::invalid_hyperparameter(
            "n_sensors",
            n_sensors,
            ">= 1",
        ));
    }
    Ok(())
}
