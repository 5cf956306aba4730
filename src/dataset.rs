//! Field data records and the geographic search domain.
//!
//! A run operates on a fixed, immutable collection of [`SamplePoint`]s. The
//! rectangular [`GeographicDomain`] is derived once from the dataset extrema
//! and bounds every candidate sensor coordinate for the whole run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiegoError};

/// Salinity above this marks a sample as critical.
pub const CRITICAL_SALINITY: f64 = 2.5;
/// Humidity below this marks a sample as critically dry.
pub const CRITICAL_HUMIDITY_DRY: f64 = 15.0;
/// Humidity above this marks a sample as critically wet.
pub const CRITICAL_HUMIDITY_WET: f64 = 40.0;

/// Crop categories observed in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Maize,
    Tomato,
    Chile,
}

impl Crop {
    /// All crop categories, in canonical order.
    pub const ALL: [Crop; 3] = [Crop::Maize, Crop::Tomato, Crop::Chile];

    /// Human-readable category name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Crop::Maize => "maize",
            Crop::Tomato => "tomato",
            Crop::Chile => "chile",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One field measurement record.
///
/// Coordinates are decimal degrees; humidity is volumetric percent, salinity
/// dS/m, elevation meters, temperature degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub crop: Crop,
    pub humidity: f64,
    pub salinity: f64,
    pub elevation: f64,
    pub temperature: f64,
}

impl SamplePoint {
    /// Whether this sample needs priority monitoring: extreme salinity or
    /// humidity outside the workable band.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.salinity > CRITICAL_SALINITY
            || self.humidity < CRITICAL_HUMIDITY_DRY
            || self.humidity > CRITICAL_HUMIDITY_WET
    }
}

/// A candidate sensor position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl SensorLocation {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Euclidean distance to a coordinate pair, in coordinate-degree units.
    #[must_use]
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        let dlat = self.latitude - latitude;
        let dlon = self.longitude - longitude;
        (dlat * dlat + dlon * dlon).sqrt()
    }

    /// Reshape a flattened `[lat1, lon1, lat2, lon2, ...]` vector into
    /// sensor locations. Trailing odd elements are ignored.
    #[must_use]
    pub fn from_flat(position: &[f64]) -> Vec<SensorLocation> {
        position
            .chunks_exact(2)
            .map(|pair| SensorLocation::new(pair[0], pair[1]))
            .collect()
    }
}

/// Rectangular search domain derived from dataset extrema.
///
/// Every particle coordinate is hard-clamped to these bounds after every
/// position update; positions are never reflected or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicDomain {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeographicDomain {
    /// Derive bounds from the dataset extrema.
    ///
    /// # Errors
    ///
    /// Returns [`RiegoError::EmptyDataset`] for an empty dataset and
    /// [`RiegoError::DegenerateDomain`] when every sample carries identical
    /// coordinates, which would leave the optimizer nothing to search.
    pub fn from_samples(samples: &[SamplePoint]) -> Result<Self> {
        if samples.is_empty() {
            return Err(RiegoError::EmptyDataset);
        }

        let mut domain = GeographicDomain {
            lat_min: f64::INFINITY,
            lat_max: f64::NEG_INFINITY,
            lon_min: f64::INFINITY,
            lon_max: f64::NEG_INFINITY,
        };
        for sample in samples {
            domain.lat_min = domain.lat_min.min(sample.latitude);
            domain.lat_max = domain.lat_max.max(sample.latitude);
            domain.lon_min = domain.lon_min.min(sample.longitude);
            domain.lon_max = domain.lon_max.max(sample.longitude);
        }

        if domain.lat_span() == 0.0 && domain.lon_span() == 0.0 {
            return Err(RiegoError::DegenerateDomain {
                lat_span: domain.lat_span(),
                lon_span: domain.lon_span(),
            });
        }

        Ok(domain)
    }

    /// Latitude extent in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude extent in degrees.
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Whether a location lies within the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, location: &SensorLocation) -> bool {
        (self.lat_min..=self.lat_max).contains(&location.latitude)
            && (self.lon_min..=self.lon_max).contains(&location.longitude)
    }

    /// Hard-clamp a flattened `[lat, lon, lat, lon, ...]` position in place.
    /// Even indices are latitudes, odd indices longitudes.
    pub fn clamp_position(&self, position: &mut [f64]) {
        for (i, coord) in position.iter_mut().enumerate() {
            *coord = if i % 2 == 0 {
                coord.clamp(self.lat_min, self.lat_max)
            } else {
                coord.clamp(self.lon_min, self.lon_max)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lon: f64) -> SamplePoint {
        SamplePoint {
            latitude: lat,
            longitude: lon,
            crop: Crop::Maize,
            humidity: 30.0,
            salinity: 1.0,
            elevation: 20.0,
            temperature: 25.0,
        }
    }

    #[test]
    fn test_distance_is_euclidean_in_degrees() {
        let sensor = SensorLocation::new(0.0, 0.0);
        assert!((sensor.distance_to(3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((sensor.distance_to(0.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_from_flat_pairs_coordinates() {
        let sensors = SensorLocation::from_flat(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(sensors.len(), 2);
        assert!((sensors[0].latitude - 1.0).abs() < 1e-12);
        assert!((sensors[0].longitude - 2.0).abs() < 1e-12);
        assert!((sensors[1].latitude - 3.0).abs() < 1e-12);
        assert!((sensors[1].longitude - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_critical_thresholds_are_strict() {
        let mut point = sample(0.0, 0.0);
        assert!(!point.is_critical());

        point.salinity = CRITICAL_SALINITY;
        assert!(!point.is_critical(), "salinity exactly 2.5 is not critical");
        point.salinity = CRITICAL_SALINITY + 0.01;
        assert!(point.is_critical());

        point.salinity = 1.0;
        point.humidity = CRITICAL_HUMIDITY_DRY;
        assert!(!point.is_critical(), "humidity exactly 15 is not critical");
        point.humidity = CRITICAL_HUMIDITY_DRY - 0.01;
        assert!(point.is_critical());

        point.humidity = CRITICAL_HUMIDITY_WET;
        assert!(!point.is_critical(), "humidity exactly 40 is not critical");
        point.humidity = CRITICAL_HUMIDITY_WET + 0.01;
        assert!(point.is_critical());
    }

    #[test]
    fn test_domain_from_sample_extrema() {
        let samples = vec![sample(25.52, -108.42), sample(25.62, -108.52)];
        let domain = GeographicDomain::from_samples(&samples).expect("valid domain");
        assert!((domain.lat_min - 25.52).abs() < 1e-12);
        assert!((domain.lat_max - 25.62).abs() < 1e-12);
        assert!((domain.lon_min - -108.52).abs() < 1e-12);
        assert!((domain.lon_max - -108.42).abs() < 1e-12);
    }

    #[test]
    fn test_domain_rejects_empty_dataset() {
        assert!(matches!(
            GeographicDomain::from_samples(&[]),
            Err(RiegoError::EmptyDataset)
        ));
    }

    #[test]
    fn test_domain_rejects_identical_coordinates() {
        let samples = vec![sample(25.5, -108.5), sample(25.5, -108.5)];
        assert!(matches!(
            GeographicDomain::from_samples(&samples),
            Err(RiegoError::DegenerateDomain { .. })
        ));
    }

    #[test]
    fn test_domain_accepts_single_axis_span() {
        // Samples on one meridian still leave a 1-D search space.
        let samples = vec![sample(25.5, -108.5), sample(25.6, -108.5)];
        assert!(GeographicDomain::from_samples(&samples).is_ok());
    }

    #[test]
    fn test_clamp_lands_exactly_on_bound() {
        let domain = GeographicDomain {
            lat_min: 0.0,
            lat_max: 1.0,
            lon_min: -2.0,
            lon_max: 2.0,
        };
        // An overshooting step must clamp to exactly the bound, not beyond.
        let mut position = vec![1.7, 5.0, -0.3, -9.0];
        domain.clamp_position(&mut position);
        assert_eq!(position[0], 1.0);
        assert_eq!(position[1], 2.0);
        assert_eq!(position[2], 0.0);
        assert_eq!(position[3], -2.0);
    }

    #[test]
    fn test_clamp_leaves_interior_untouched() {
        let domain = GeographicDomain {
            lat_min: 0.0,
            lat_max: 1.0,
            lon_min: 0.0,
            lon_max: 1.0,
        };
        let mut position = vec![0.25, 0.75];
        domain.clamp_position(&mut position);
        assert_eq!(position, vec![0.25, 0.75]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let domain = GeographicDomain {
            lat_min: 0.0,
            lat_max: 1.0,
            lon_min: 0.0,
            lon_max: 1.0,
        };
        assert!(domain.contains(&SensorLocation::new(0.0, 1.0)));
        assert!(domain.contains(&SensorLocation::new(0.5, 0.5)));
        assert!(!domain.contains(&SensorLocation::new(1.0001, 0.5)));
    }
}
