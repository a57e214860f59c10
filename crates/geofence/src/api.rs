//! The two call surfaces an orchestrator needs.
//!
//! - `construct`: one area per authority query, from the true device location.
//! - `check_location`: classify each later fix against the stored area.
//!
//! A fix the platform could not deliver is "unknown" and must not reach
//! `check_location`; keep using the stored area until a real fix arrives.

pub use crate::antimeridian::{longitude_delta, normalize_longitude, MAX_LONGITUDE, MIN_LONGITUDE};
pub use crate::area::check_location;
pub use crate::ellipse::cfg::{
    DEFAULT_CENTER_LEEWAY_DEGREES, DEFAULT_ORIENTATION_DEGREES, DEFAULT_SEMI_MAJOR_AXIS_METERS,
    DEFAULT_SEMI_MINOR_AXIS_METERS, ONE_DEGREE_LONGITUDE_IN_METERS,
};

use crate::area::AuthorizedArea;
use crate::ellipse::placement::UnitDraw;
use crate::ellipse::Ellipse;
use crate::error::GeofenceError;
use crate::point::GeoPoint;

/// Build the ellipse area for one authority query.
///
/// Pre: `true_location` is a validated fix.
/// Post: the area's center is jittered by at most `leeway_degrees` per axis;
/// fails with `InvalidGeometry` for non-positive axes.
pub fn construct<D: UnitDraw + ?Sized>(
    semi_minor_meters: f64,
    semi_major_meters: f64,
    orientation_degrees: f64,
    leeway_degrees: f64,
    draws: &mut D,
    true_location: GeoPoint,
) -> Result<AuthorizedArea, GeofenceError> {
    Ellipse::new(
        semi_minor_meters,
        semi_major_meters,
        orientation_degrees,
        leeway_degrees,
        draws,
        true_location,
    )
    .map(AuthorizedArea::Ellipse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{ContainmentResult, RequestShape};
    use crate::ellipse::placement::FixedDraws;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn end_to_end_default_scenario() {
        let mut draws = FixedDraws::constant(0.5).unwrap();
        let truth = GeoPoint::new(9.9, 2.5).unwrap();
        let area = construct(
            DEFAULT_SEMI_MINOR_AXIS_METERS,
            DEFAULT_SEMI_MAJOR_AXIS_METERS,
            DEFAULT_ORIENTATION_DEGREES,
            DEFAULT_CENTER_LEEWAY_DEGREES,
            &mut draws,
            truth,
        )
        .unwrap();
        let AuthorizedArea::Ellipse(e) = &area;
        let c = e.center();
        assert!((c.latitude() - 9.9).abs() < 1e-12);
        assert!((c.longitude() - 2.5).abs() < 1e-12);

        let major = DEFAULT_SEMI_MAJOR_AXIS_METERS / ONE_DEGREE_LONGITUDE_IN_METERS;
        let at_lon = |lon: f64| GeoPoint::new(c.latitude(), lon).unwrap();
        assert_eq!(check_location(&area, c), ContainmentResult::Inside);
        assert_eq!(
            check_location(&area, at_lon(c.longitude() + major)),
            ContainmentResult::OnBorder
        );
        assert_eq!(
            check_location(&area, at_lon(c.longitude() + major + 2.0)),
            ContainmentResult::Outside
        );
    }

    #[test]
    fn construct_rejects_non_positive_axes() {
        let mut rng = StdRng::seed_from_u64(11);
        let truth = GeoPoint::new(1.0, 1.0).unwrap();
        let err = construct(-5.0, 500.0, 0.0, 0.001, &mut rng, truth).unwrap_err();
        assert!(matches!(err, GeofenceError::InvalidGeometry { .. }));
    }

    #[test]
    fn seeded_construction_is_reproducible() {
        let truth = GeoPoint::new(-33.87, 151.21).unwrap();
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            construct(500.0, 500.0, 0.0, 0.001, &mut rng, truth).unwrap()
        };
        assert_eq!(build(5), build(5));
        assert_eq!(
            build(5).to_request_json().unwrap(),
            build(5).to_request_json().unwrap()
        );
    }
}
