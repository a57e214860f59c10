//! Longitude wraparound at the ±180° seam.
//!
//! Every longitude difference used by placement and containment goes through
//! `longitude_delta`; raw subtraction across the seam yields deltas near 360°.
//!
//! Values already in range are returned bit-for-bit unchanged, so points that
//! never approach the seam classify exactly as with plain subtraction.

/// Lower (inclusive) bound of a normalized longitude.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Upper (exclusive) bound of a normalized longitude.
pub const MAX_LONGITUDE: f64 = 180.0;

const FULL_TURN: f64 = MAX_LONGITUDE - MIN_LONGITUDE;

/// Map a finite longitude into `[-180, 180)` by whole-turn adjustments.
///
/// Non-finite input is returned unchanged; callers validate at the boundary.
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return lon;
    }
    let mut lon = lon;
    if lon.abs() > 2.0 * FULL_TURN {
        lon = (lon - MIN_LONGITUDE).rem_euclid(FULL_TURN) + MIN_LONGITUDE;
    }
    while lon >= MAX_LONGITUDE {
        lon -= FULL_TURN;
    }
    while lon < MIN_LONGITUDE {
        lon += FULL_TURN;
    }
    lon
}

/// Signed shortest angular difference `a - b`, in `(-180, 180]`.
#[inline]
pub fn longitude_delta(a: f64, b: f64) -> f64 {
    let mut d = a - b;
    if !d.is_finite() {
        return d;
    }
    if d.abs() > FULL_TURN {
        d = d.rem_euclid(FULL_TURN);
    }
    while d > MAX_LONGITUDE {
        d -= FULL_TURN;
    }
    while d <= MIN_LONGITUDE {
        d += FULL_TURN;
    }
    d
}
