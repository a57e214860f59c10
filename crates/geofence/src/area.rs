//! Authorized areas: the shape-polymorphic containment capability.
//!
//! Callers hold an `AuthorizedArea` (or anything implementing `AreaShape`) and
//! never depend on the concrete shape. `check_location` is the dispatcher entry
//! point; it performs no geometry itself.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::ellipse::cfg::EllipseCfg;
use crate::ellipse::placement::UnitDraw;
use crate::ellipse::Ellipse;
use crate::error::GeofenceError;
use crate::point::GeoPoint;
use crate::request::{self, ShapePayload};

/// Where an observed point lies relative to an area boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainmentResult {
    Inside,
    OnBorder,
    Outside,
}

impl ContainmentResult {
    /// Whether a cached authorization for the area can still be used.
    #[inline]
    pub fn keeps_authorization(self) -> bool {
        !matches!(self, Self::Outside)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inside => "INSIDE",
            Self::OnBorder => "ON_BORDER",
            Self::Outside => "OUTSIDE",
        }
    }
}

/// Reference level of an antenna height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeightType {
    /// Above ground level.
    Agl,
    /// Above mean sea level (WGS84).
    #[default]
    Amsl,
}

/// Indoor/outdoor deployment of the device. Ordinals are the wire values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deployment {
    #[default]
    Unknown = 0,
    Indoor = 1,
    Outdoor = 2,
}

/// Device elevation reported alongside an area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Elevation {
    pub height_meters: f64,
    pub vertical_uncertainty_meters: f64,
    pub height_type: HeightType,
}

/// A true device fix as delivered by the platform location service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DeviceLocation {
    pub point: GeoPoint,
    pub altitude_meters: Option<f64>,
    pub vertical_accuracy_meters: Option<f64>,
}

impl DeviceLocation {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            altitude_meters: None,
            vertical_accuracy_meters: None,
        }
    }

    /// Elevation metadata (AMSL); missing readings count as 0.
    pub fn elevation(&self) -> Elevation {
        Elevation {
            height_meters: self.altitude_meters.unwrap_or(0.0),
            vertical_uncertainty_meters: self.vertical_accuracy_meters.unwrap_or(0.0),
            height_type: HeightType::Amsl,
        }
    }
}

/// Capability shared by all area shapes.
pub trait AreaShape {
    fn check_location(&self, point: GeoPoint) -> ContainmentResult;
}

/// Shapes that can be reported to the authority as a request `location`.
pub trait RequestShape: AreaShape {
    fn elevation(&self) -> &Elevation;

    fn deployment(&self) -> Deployment;

    /// Shape-specific part of the AFC request `location` object.
    fn shape_payload(&self) -> ShapePayload;

    /// Full AFC request `location` object for this area.
    fn to_request_json(&self) -> serde_json::Result<serde_json::Value> {
        request::location_json(self)
    }
}

impl AreaShape for Ellipse {
    #[inline]
    fn check_location(&self, point: GeoPoint) -> ContainmentResult {
        Ellipse::check_location(self, point)
    }
}

impl RequestShape for Ellipse {
    fn elevation(&self) -> &Elevation {
        Ellipse::elevation(self)
    }

    fn deployment(&self) -> Deployment {
        Ellipse::deployment(self)
    }

    fn shape_payload(&self) -> ShapePayload {
        ShapePayload::from_ellipse(self)
    }
}

/// Tagged area variants; one per supported shape.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthorizedArea {
    Ellipse(Ellipse),
}

impl AreaShape for AuthorizedArea {
    #[inline]
    fn check_location(&self, point: GeoPoint) -> ContainmentResult {
        match self {
            Self::Ellipse(e) => e.check_location(point),
        }
    }
}

impl RequestShape for AuthorizedArea {
    fn elevation(&self) -> &Elevation {
        match self {
            Self::Ellipse(e) => e.elevation(),
        }
    }

    fn deployment(&self) -> Deployment {
        match self {
            Self::Ellipse(e) => e.deployment(),
        }
    }

    fn shape_payload(&self) -> ShapePayload {
        match self {
            Self::Ellipse(e) => e.shape_payload(),
        }
    }
}

impl From<Ellipse> for AuthorizedArea {
    fn from(e: Ellipse) -> Self {
        Self::Ellipse(e)
    }
}

/// Dispatcher: classify `point` against whatever shape `area` is.
#[inline]
pub fn check_location<A: AreaShape + ?Sized>(area: &A, point: GeoPoint) -> ContainmentResult {
    area.check_location(point)
}

/// Build an area for `location` from `cfg`, with elevation taken from the fix.
pub fn create_area_with<D: UnitDraw + ?Sized>(
    cfg: &EllipseCfg,
    location: &DeviceLocation,
    draws: &mut D,
) -> Result<AuthorizedArea, GeofenceError> {
    let ellipse =
        Ellipse::from_cfg(cfg, location.point, draws)?.with_elevation(location.elevation());
    Ok(AuthorizedArea::Ellipse(ellipse))
}

/// Build an area for `location` with the default ellipse parameters.
pub fn create_area<R: RngCore>(
    location: &DeviceLocation,
    rng: &mut R,
) -> Result<AuthorizedArea, GeofenceError> {
    create_area_with(&EllipseCfg::default(), location, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipse::placement::FixedDraws;
    use rand::{rngs::StdRng, SeedableRng};

    /// Fixed-answer shape for exercising the dispatcher in isolation.
    struct Canned(ContainmentResult);

    impl AreaShape for Canned {
        fn check_location(&self, _point: GeoPoint) -> ContainmentResult {
            self.0
        }
    }

    #[test]
    fn dispatcher_forwards_every_result() {
        let p = GeoPoint::new(9.9, 9.9).unwrap();
        for r in [
            ContainmentResult::Inside,
            ContainmentResult::OnBorder,
            ContainmentResult::Outside,
        ] {
            let shape = Canned(r);
            assert_eq!(check_location(&shape, p), r);
            let dynamic: &dyn AreaShape = &shape;
            assert_eq!(check_location(dynamic, p), r);
        }
    }

    #[test]
    fn enum_and_concrete_shape_agree() {
        let truth = GeoPoint::new(48.85, 2.35).unwrap();
        let mut draws = FixedDraws::constant(0.5).unwrap();
        let e = Ellipse::from_cfg(&EllipseCfg::default(), truth, &mut draws).unwrap();
        let area = AuthorizedArea::from(e.clone());
        for (lat, lon) in [(48.85, 2.35), (48.85, 2.356), (48.9, 2.35), (48.85, 2.3545)] {
            let p = GeoPoint::new(lat, lon).unwrap();
            assert_eq!(check_location(&area, p), e.check_location(p));
        }
    }

    #[test]
    fn create_area_uses_defaults_and_fix_elevation() {
        let mut loc = DeviceLocation::new(GeoPoint::new(37.42, -122.08).unwrap());
        loc.altitude_meters = Some(31.5);
        loc.vertical_accuracy_meters = Some(4.0);
        let mut rng = StdRng::seed_from_u64(3);
        let area = create_area(&loc, &mut rng).unwrap();
        let AuthorizedArea::Ellipse(e) = &area;
        assert_eq!(e.semi_major_axis_meters(), 500.0);
        assert_eq!(e.semi_minor_axis_meters(), 500.0);
        assert_eq!(e.orientation_degrees(), 0.0);
        assert_eq!(e.center_leeway_degrees(), 0.001);
        assert_eq!(area.elevation().height_meters, 31.5);
        assert_eq!(area.elevation().vertical_uncertainty_meters, 4.0);
        assert_eq!(area.elevation().height_type, HeightType::Amsl);
        // The true location is always covered: leeway is well inside the axes.
        assert_eq!(check_location(&area, loc.point), ContainmentResult::Inside);
    }

    #[test]
    fn create_area_with_propagates_invalid_geometry() {
        let loc = DeviceLocation::new(GeoPoint::new(0.0, 0.0).unwrap());
        let cfg = EllipseCfg {
            semi_minor_axis_meters: 0.0,
            ..EllipseCfg::default()
        };
        let mut draws = FixedDraws::constant(0.5).unwrap();
        let err = create_area_with(&cfg, &loc, &mut draws).unwrap_err();
        assert!(matches!(err, GeofenceError::InvalidGeometry { .. }));
    }

    #[test]
    fn only_outside_drops_the_authorization() {
        assert!(ContainmentResult::Inside.keeps_authorization());
        assert!(ContainmentResult::OnBorder.keeps_authorization());
        assert!(!ContainmentResult::Outside.keeps_authorization());
        assert_eq!(ContainmentResult::OnBorder.as_str(), "ON_BORDER");
    }
}
