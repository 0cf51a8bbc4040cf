//! Great-circle distance between geographic coordinates.

use std::f64::consts::PI;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic position in degrees. Equality is exact value equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Equal coordinates are zero by convention; the spherical formula is
/// numerically unstable at zero separation.
pub fn distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    let dr = PI / 180.0;
    ((from.lat * dr).sin() * (to.lat * dr).sin()
        + (from.lat * dr).cos() * (to.lat * dr).cos() * (((from.lng - to.lng).abs()) * dr).cos())
    .acos()
        * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero() {
        let point = Coordinates::new(55.611087, 37.20829);
        assert_eq!(distance(point, point), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        let d = distance(a, b);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(55.574371, 37.6517);
        let b = Coordinates::new(55.587655, 37.645687);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn longitude_difference_sign_does_not_matter() {
        let a = Coordinates::new(10.0, -5.0);
        let b = Coordinates::new(10.0, 5.0);
        let c = Coordinates::new(10.0, 15.0);
        let left = distance(a, b);
        let right = distance(b, c);
        assert!((left - right).abs() < 1e-6);
    }
}
