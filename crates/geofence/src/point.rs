//! Geographic points in degrees.

use serde::Serialize;

use crate::antimeridian::{normalize_longitude, MAX_LONGITUDE, MIN_LONGITUDE};
use crate::error::GeofenceError;

/// Latitude/longitude pair in degrees.
///
/// Invariants (enforced by `new`):
/// - both coordinates are finite;
/// - latitude in `[-90, 90]`, longitude in `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validated constructor for observed or true device positions.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeofenceError> {
        if !latitude.is_finite() {
            return Err(GeofenceError::coordinate(format!(
                "latitude must be finite, got {latitude}"
            )));
        }
        if !longitude.is_finite() {
            return Err(GeofenceError::coordinate(format!(
                "longitude must be finite, got {longitude}"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeofenceError::coordinate(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(GeofenceError::coordinate(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Like `new`, but wraps an out-of-range longitude into `[-180, 180)` first.
    pub fn wrapped(latitude: f64, longitude: f64) -> Result<Self, GeofenceError> {
        if !longitude.is_finite() {
            return Err(GeofenceError::coordinate(format!(
                "longitude must be finite, got {longitude}"
            )));
        }
        Self::new(latitude, normalize_longitude(longitude))
    }

    /// Unchecked construction for derived points (e.g. a jittered center,
    /// whose latitude may overshoot a pole by at most the leeway).
    #[inline]
    pub(crate) fn from_parts(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_edges() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_and_out_of_range() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(GeofenceError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.01).is_err());
    }

    #[test]
    fn wrapped_normalizes_longitude() {
        let p = GeoPoint::wrapped(12.0, 185.0).unwrap();
        assert!((p.longitude() - (-175.0)).abs() < 1e-12);
        assert_eq!(p.latitude(), 12.0);
        assert!(GeoPoint::wrapped(0.0, f64::NAN).is_err());
    }
}
