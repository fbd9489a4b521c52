//! Great-circle distance between WGS84 coordinates.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_METRES`]. Inputs are expected to be valid coordinates
//! (`-90..=90` latitude, `-180..=180` longitude); other values produce an
//! unspecified, but finite or NaN, result rather than an error.

use geo::Coord;

/// Mean Earth radius used for every distance in the crate.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

/// Unrounded haversine distance in metres between `a` and `b`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::haversine_metres;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let one_degree_east = Coord { x: 1.0, y: 0.0 };
/// let metres = haversine_metres(origin, one_degree_east);
/// assert!((metres - 111_194.93).abs() < 0.01);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_metres(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_delta_lat = (b.y - a.y).to_radians() / 2.0;
    let half_delta_lon = (b.x - a.x).to_radians() / 2.0;

    let h = half_delta_lat.sin().powi(2)
        + lat_a.cos() * lat_b.cos() * half_delta_lon.sin().powi(2);
    // Rounding can push `h` marginally above one for antipodal points.
    let central_angle = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_METRES * central_angle
}

/// Haversine distance rounded to the nearest whole metre.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::distance_metres;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(distance_metres(origin, origin), 0);
/// assert_eq!(distance_metres(origin, Coord { x: 1.0, y: 0.0 }), 111_195);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "haversine output is non-negative and bounded by half the Earth's circumference"
)]
#[must_use]
pub fn distance_metres(a: Coord<f64>, b: Coord<f64>) -> u64 {
    // `as` saturates, so a NaN from out-of-range input becomes zero.
    haversine_metres(a, b).round() as u64
}
