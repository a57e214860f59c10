//! Geofence containment core for AFC authorizations.
//!
//! An AFC (automated frequency coordination) authorization is valid for the
//! area it was requested for. This crate models that area as an ellipse
//! around a privacy-jittered center and classifies fresh device fixes as
//! inside, on the border of, or outside it, so callers only re-query the
//! authority after a meaningful move.
//!
//! Layout
//! - `point`: validated `GeoPoint`.
//! - `antimeridian`: longitude wraparound at ±180°.
//! - `ellipse`: geometry, construction defaults, randomized center placement.
//! - `area`: the `AreaShape` capability, `RequestShape` reporting, `AuthorizedArea`
//!   variants, dispatcher.
//! - `request`: AFC request `location` payload.
//!
//! Everything here is synchronous and side-effect free apart from the draws
//! consumed once at construction.

pub mod antimeridian;
pub mod api;
pub mod area;
pub mod ellipse;
pub mod error;
pub mod point;
pub mod request;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use area::{check_location, AreaShape, AuthorizedArea, ContainmentResult, RequestShape};
pub use ellipse::Ellipse;
pub use error::GeofenceError;
pub use point::GeoPoint;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::area::{
        check_location, create_area, create_area_with, AreaShape, AuthorizedArea,
        ContainmentResult, Deployment, DeviceLocation, Elevation, HeightType, RequestShape,
    };
    pub use crate::ellipse::cfg::EllipseCfg;
    pub use crate::ellipse::placement::{FixedDraws, UnitDraw};
    pub use crate::ellipse::Ellipse;
    pub use crate::error::GeofenceError;
    pub use crate::point::GeoPoint;
}
