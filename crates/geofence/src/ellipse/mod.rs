//! Ellipse-shaped authorized areas.
//!
//! Purpose
//! - Model the area an AFC authorization is valid for as an ellipse around a
//!   privacy-jittered center, and classify observed points against it.
//!
//! Geometry (flat approximation)
//! - Deltas are taken in degrees: `d_lon` via `longitude_delta` (seam-aware),
//!   `d_lat` by plain subtraction.
//! - Axis lengths are converted with one equatorial meters-per-degree factor
//!   for both axes. This ignores the latitude-dependent longitude scale on
//!   purpose; authorizations were computed against the same approximation.
//! - The delta vector is rotated by `-orientation` into the ellipse frame,
//!   then the canonical form `(x/a)^2 + (y/b)^2` is compared against the
//!   border band `[1 - eps, 1 + eps]`.
//!
//! Code cross-refs: `antimeridian`, `area::{AreaShape, ContainmentResult}`.

pub mod cfg;
pub mod placement;

use nalgebra::{Rotation2, Vector2};

use crate::antimeridian::longitude_delta;
use crate::area::{ContainmentResult, Deployment, Elevation};
use crate::error::GeofenceError;
use crate::point::GeoPoint;
use self::cfg::{meters_to_degrees, EllipseCfg, BORDER_EPS};
use self::placement::{jitter_center, UnitDraw};

/// Immutable ellipse area. Built once per authorization, then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    semi_minor_axis_meters: f64,
    semi_major_axis_meters: f64,
    orientation_degrees: f64,
    center_leeway_degrees: f64,
    center: GeoPoint,
    elevation: Elevation,
    deployment: Deployment,
}

impl Ellipse {
    /// Build an ellipse around `true_location`, jittering its center with two
    /// draws from `draws`.
    ///
    /// Errors with `InvalidGeometry` when an axis is not a positive finite
    /// length, the leeway is negative or non-finite, or the orientation is
    /// non-finite. No draws are consumed on error.
    pub fn new<D: UnitDraw + ?Sized>(
        semi_minor_axis_meters: f64,
        semi_major_axis_meters: f64,
        orientation_degrees: f64,
        center_leeway_degrees: f64,
        draws: &mut D,
        true_location: GeoPoint,
    ) -> Result<Self, GeofenceError> {
        validate_axis("semi-minor", semi_minor_axis_meters)?;
        validate_axis("semi-major", semi_major_axis_meters)?;
        if !orientation_degrees.is_finite() {
            return Err(GeofenceError::geometry(format!(
                "orientation must be finite, got {orientation_degrees}"
            )));
        }
        if !(center_leeway_degrees.is_finite() && center_leeway_degrees >= 0.0) {
            return Err(GeofenceError::geometry(format!(
                "center leeway must be finite and >= 0, got {center_leeway_degrees}"
            )));
        }
        let center = jitter_center(true_location, center_leeway_degrees, draws);
        tracing::debug!(
            semi_minor_axis_meters,
            semi_major_axis_meters,
            orientation_degrees,
            center_leeway_degrees,
            center_lat = center.latitude(),
            center_lon = center.longitude(),
            "ellipse_area_built"
        );
        Ok(Self {
            semi_minor_axis_meters,
            semi_major_axis_meters,
            orientation_degrees,
            center_leeway_degrees,
            center,
            elevation: Elevation::default(),
            deployment: Deployment::default(),
        })
    }

    /// `new` with shape parameters taken from `cfg`.
    pub fn from_cfg<D: UnitDraw + ?Sized>(
        cfg: &EllipseCfg,
        true_location: GeoPoint,
        draws: &mut D,
    ) -> Result<Self, GeofenceError> {
        Self::new(
            cfg.semi_minor_axis_meters,
            cfg.semi_major_axis_meters,
            cfg.orientation_degrees,
            cfg.center_leeway_degrees,
            draws,
            true_location,
        )
    }

    /// Attach elevation metadata reported alongside the area.
    pub fn with_elevation(mut self, elevation: Elevation) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployment = deployment;
        self
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.center
    }
    #[inline]
    pub fn semi_minor_axis_meters(&self) -> f64 {
        self.semi_minor_axis_meters
    }
    #[inline]
    pub fn semi_major_axis_meters(&self) -> f64 {
        self.semi_major_axis_meters
    }
    #[inline]
    pub fn orientation_degrees(&self) -> f64 {
        self.orientation_degrees
    }
    #[inline]
    pub fn center_leeway_degrees(&self) -> f64 {
        self.center_leeway_degrees
    }
    #[inline]
    pub fn elevation(&self) -> &Elevation {
        &self.elevation
    }
    #[inline]
    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Semi-minor axis as an angular length.
    #[inline]
    pub fn semi_minor_axis_degrees(&self) -> f64 {
        meters_to_degrees(self.semi_minor_axis_meters)
    }

    /// Semi-major axis as an angular length.
    #[inline]
    pub fn semi_major_axis_degrees(&self) -> f64 {
        meters_to_degrees(self.semi_major_axis_meters)
    }

    /// Canonical ellipse form at `point`: `< 1` inside, `> 1` outside.
    pub(crate) fn canonical_value(&self, point: GeoPoint) -> f64 {
        let d_lon = longitude_delta(point.longitude(), self.center.longitude());
        let d_lat = point.latitude() - self.center.latitude();
        let rot = Rotation2::new(-self.orientation_degrees.to_radians());
        let local = rot * Vector2::new(d_lon, d_lat);
        let x = local.x / self.semi_major_axis_degrees();
        let y = local.y / self.semi_minor_axis_degrees();
        x * x + y * y
    }

    /// Classify `point` as inside, on the border of, or outside this ellipse.
    pub fn check_location(&self, point: GeoPoint) -> ContainmentResult {
        let value = self.canonical_value(point);
        let result = classify(value);
        tracing::trace!(
            lat = point.latitude(),
            lon = point.longitude(),
            value,
            ?result,
            "ellipse_check"
        );
        result
    }
}

#[inline]
fn validate_axis(name: &str, meters: f64) -> Result<(), GeofenceError> {
    if meters.is_finite() && meters > 0.0 {
        Ok(())
    } else {
        Err(GeofenceError::geometry(format!(
            "{name} axis must be finite and > 0 meters, got {meters}"
        )))
    }
}

/// Map a canonical value onto the three-way result.
#[inline]
pub(crate) fn classify(value: f64) -> ContainmentResult {
    if value > 1.0 + BORDER_EPS {
        ContainmentResult::Outside
    } else if value < 1.0 - BORDER_EPS {
        ContainmentResult::Inside
    } else {
        ContainmentResult::OnBorder
    }
}
