//! Randomized center placement (location privacy).
//!
//! Model
//! - The reported center is drawn uniformly from the square
//!   `[lat0 - L, lat0 + L] x [lon0 - L, lon0 + L]` (degrees) around the true
//!   location. Latitude is drawn first, then longitude; the longitude is wrapped
//!   across the seam.
//! - Draws are injected: production passes any `rand` RNG, replay and tests pass
//!   `FixedDraws`.

use rand::{Rng, RngCore};

use crate::antimeridian::normalize_longitude;
use crate::point::GeoPoint;

/// Source of independent uniform draws in `[0, 1)`.
pub trait UnitDraw {
    fn draw_unit(&mut self) -> f64;
}

impl<R: RngCore> UnitDraw for R {
    #[inline]
    fn draw_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedDraws {
    values: Vec<f64>,
    next: usize,
}

impl FixedDraws {
    /// `None` if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: impl Into<Vec<f64>>) -> Option<Self> {
        let values = values.into();
        if values.is_empty() || !values.iter().all(|v| (0.0..1.0).contains(v)) {
            return None;
        }
        Some(Self { values, next: 0 })
    }

    /// The same draw every time.
    pub fn constant(value: f64) -> Option<Self> {
        Self::new(vec![value])
    }
}

impl UnitDraw for FixedDraws {
    fn draw_unit(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next = (self.next + 1) % self.values.len();
        v
    }
}

/// Jitter `true_location` within `leeway` degrees per axis.
///
/// Consumes exactly two draws. `leeway = 0` returns the true location.
pub fn jitter_center<D: UnitDraw + ?Sized>(
    true_location: GeoPoint,
    leeway: f64,
    draws: &mut D,
) -> GeoPoint {
    let lat_draw = draws.draw_unit();
    let lon_draw = draws.draw_unit();
    let latitude = lat_draw * 2.0 * leeway + (true_location.latitude() - leeway);
    let longitude =
        normalize_longitude(lon_draw * 2.0 * leeway + (true_location.longitude() - leeway));
    GeoPoint::from_parts(latitude, longitude)
}
