//! AFC request `location` payload.
//!
//! Layout follows the available-spectrum inquiry `location` object: one
//! shape member (`ellipse`), an `elevation` block and `indoorDeployment`.

use serde::Serialize;

use crate::area::{Elevation, HeightType, RequestShape};
use crate::ellipse::Ellipse;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PointPayload {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipsePayload {
    pub center: PointPayload,
    pub major_axis: f64,
    pub minor_axis: f64,
    pub orientation: f64,
}

/// Shape member of the location object, keyed by shape name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapePayload {
    Ellipse(EllipsePayload),
}

impl ShapePayload {
    /// Report `e` with its jittered center. The center latitude is not clamped,
    /// so near a pole it can overshoot ±90° by up to the center leeway.
    pub fn from_ellipse(e: &Ellipse) -> Self {
        let c = e.center();
        Self::Ellipse(EllipsePayload {
            center: PointPayload {
                longitude: c.longitude(),
                latitude: c.latitude(),
            },
            major_axis: e.semi_major_axis_meters(),
            minor_axis: e.semi_minor_axis_meters(),
            orientation: e.orientation_degrees(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElevationPayload {
    height: f64,
    height_type: HeightType,
    vertical_uncertainty: f64,
}

impl From<&Elevation> for ElevationPayload {
    fn from(e: &Elevation) -> Self {
        Self {
            height: e.height_meters,
            height_type: e.height_type,
            vertical_uncertainty: e.vertical_uncertainty_meters,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationPayload {
    #[serde(flatten)]
    shape: ShapePayload,
    elevation: ElevationPayload,
    indoor_deployment: u8,
}

/// Render `area` as the request `location` object.
pub fn location_json<A: RequestShape + ?Sized>(
    area: &A,
) -> serde_json::Result<serde_json::Value> {
    let payload = LocationPayload {
        shape: area.shape_payload(),
        elevation: area.elevation().into(),
        indoor_deployment: area.deployment() as u8,
    };
    serde_json::to_value(payload)
}
