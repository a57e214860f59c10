//! Constants and construction defaults for ellipse areas.
//!
//! Policy
//! - The meter/degree factor and the border band are fixed constants: remote
//!   authorizations were computed against them, so they are not tunable.
//! - Shape defaults live in `EllipseCfg` and may be overridden per query.

use serde::{Deserialize, Serialize};

/// Meters per degree of longitude at the equator. Reused for the latitude
/// axis (flat approximation of the angular footprint).
pub const ONE_DEGREE_LONGITUDE_IN_METERS: f64 = 111_139.0;

/// Half-width of the `OnBorder` band around the canonical value 1.
pub(crate) const BORDER_EPS: f64 = 0.005;

pub const DEFAULT_SEMI_MINOR_AXIS_METERS: f64 = 500.0;
pub const DEFAULT_SEMI_MAJOR_AXIS_METERS: f64 = 500.0;
pub const DEFAULT_ORIENTATION_DEGREES: f64 = 0.0;
pub const DEFAULT_CENTER_LEEWAY_DEGREES: f64 = 0.001;

/// Ellipse shape parameters (everything except the true location and draws).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipseCfg {
    pub semi_minor_axis_meters: f64,
    pub semi_major_axis_meters: f64,
    /// Major-axis rotation, clockwise from true north.
    pub orientation_degrees: f64,
    /// Half-width of the square the true center is jittered within.
    pub center_leeway_degrees: f64,
}

impl Default for EllipseCfg {
    fn default() -> Self {
        Self {
            semi_minor_axis_meters: DEFAULT_SEMI_MINOR_AXIS_METERS,
            semi_major_axis_meters: DEFAULT_SEMI_MAJOR_AXIS_METERS,
            orientation_degrees: DEFAULT_ORIENTATION_DEGREES,
            center_leeway_degrees: DEFAULT_CENTER_LEEWAY_DEGREES,
        }
    }
}

/// Convert a length in meters to degrees using the fixed equatorial factor.
#[inline]
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / ONE_DEGREE_LONGITUDE_IN_METERS
}
