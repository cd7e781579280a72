//! Proximity approximation
//!
//! Clubs near a point are found with a latitude/longitude rectangle rather
//! than great-circle distance. One degree of latitude is taken as 111 km and
//! a degree of longitude shrinks with cos(latitude).
//!
//! Known inaccuracies, left as is:
//! - near the poles cos(latitude) tends to 0 and the longitude span blows up
//!   (at exactly ±90° cos(latitude) is about 6e-17, so the span is finite but
//!   effectively unbounded and every longitude matches);
//! - the box does not wrap across the antimeridian, so points just across
//!   ±180° are missed;
//! - box corners lie further away than `radius_km`.

use crate::errors::ModelError;

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

/// Inclusive lat/long rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
}

impl BoundingBox {
    /// Rectangle centred on (`lat`, `long`) spanning `radius_km` each way
    pub fn around(lat: f64, long: f64, radius_km: f64) -> Result<Self, ModelError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(ModelError::InvalidRadius { radius_km });
        }
        validate_coordinates(lat, long)?;

        let lat_delta = radius_km / KM_PER_DEGREE;
        let long_delta = radius_km / (KM_PER_DEGREE * lat.to_radians().cos());

        Ok(Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_long: long - long_delta.abs(),
            max_long: long + long_delta.abs(),
        })
    }

    pub fn contains(&self, lat: f64, long: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat)
            && (self.min_long..=self.max_long).contains(&long)
    }
}

/// Latitude in [-90, 90], longitude in [-180, 180]
pub fn validate_coordinates(lat: f64, long: f64) -> Result<(), ModelError> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&long) {
        Ok(())
    } else {
        Err(ModelError::InvalidCoordinates { lat, long })
    }
}
