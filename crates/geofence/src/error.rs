//! Error type shared by area construction and coordinate validation.

use std::fmt;

/// Errors surfaced at the boundary of the geometry core.
///
/// Classification itself never fails; only building inputs can.
#[derive(Clone, Debug, PartialEq)]
pub enum GeofenceError {
    /// Area parameters that cannot describe a real shape (axis <= 0, NaN, ...).
    InvalidGeometry { reason: String },
    /// Latitude/longitude that is non-finite or outside its canonical range.
    InvalidCoordinate { reason: String },
}

impl GeofenceError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn coordinate(reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeofenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::InvalidCoordinate { reason } => write!(f, "invalid coordinate: {reason}"),
        }
    }
}

impl std::error::Error for GeofenceError {}
