//! Planar helpers shared by the hull and the drag handles
//!
//! Roots live in the complex plane; geometry runs on `glam::DVec2`. The two
//! views convert losslessly: `re` is x and `im` is y.

use glam::{DVec2, dvec2};
use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::defaults;

/// Map a complex number to its point in the plane
#[inline]
pub fn to_point(z: Complex64) -> DVec2 {
    dvec2(z.re, z.im)
}

/// Map a point in the plane back to a complex number
#[inline]
pub fn to_complex(p: DVec2) -> Complex64 {
    Complex64::new(p.x, p.y)
}

/// Map a slice of complex numbers to points
pub fn points_of(values: &[Complex64]) -> Vec<DVec2> {
    values.iter().copied().map(to_point).collect()
}

/// Wrap an angle in radians into `[0, 2π)`
#[inline]
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Whether `o → a → b` turns counter-clockwise by more than rounding noise.
///
/// The cross product is compared against `COLLINEAR_TOLERANCE` scaled by both
/// edge lengths, so nearly collinear triples count as straight whatever
/// their size or position. Coincident points never turn.
#[inline]
pub fn turns_left(o: DVec2, a: DVec2, b: DVec2) -> bool {
    let (oa, ob) = (a - o, b - o);
    oa.perp_dot(ob) > defaults::COLLINEAR_TOLERANCE * oa.length() * ob.length()
}

/// Angle of a point as seen from the origin, in `[0, 2π)`
#[inline]
pub fn origin_angle(p: DVec2) -> f64 {
    wrap_angle(p.y.atan2(p.x))
}

/// Remove duplicate points by value, keeping first occurrences in order
pub fn dedup_points(points: &[DVec2]) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for &p in points {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

/// Whether every coordinate is finite
pub fn all_finite(points: &[DVec2]) -> bool {
    points.iter().all(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn complex_round_trip() {
        let z = Complex64::new(1.5, -2.0);
        assert_eq!(to_point(z), dvec2(1.5, -2.0));
        assert_eq!(to_complex(to_point(z)), z);
    }

    #[test]
    fn left_turns() {
        let o = DVec2::ZERO;
        assert!(turns_left(o, dvec2(1.0, 0.0), dvec2(1.0, 1.0)));
        assert!(!turns_left(o, dvec2(1.0, 0.0), dvec2(1.0, -1.0)));
        assert!(!turns_left(o, dvec2(1.0, 0.0), dvec2(2.0, 0.0)));
        assert!(!turns_left(o, dvec2(1.0, 0.0), o));
    }

    #[test]
    fn nearly_straight_is_not_a_turn() {
        // 0.1 + 0.2 is not exactly 0.3, so the cross product is tiny but non-zero
        let a = dvec2(0.1, 0.7);
        let b = dvec2(0.1 + 0.2, 2.1);
        assert!(!turns_left(DVec2::ZERO, a, b));
        assert!(!turns_left(DVec2::ZERO, b, a));
        assert!(turns_left(DVec2::ZERO, a, dvec2(0.3, 2.2)));
    }

    #[test]
    fn wrap_stays_below_tau() {
        assert_eq!(wrap_angle(-1e-300), 0.0);
        assert!(wrap_angle(-FRAC_PI_2) < TAU);
        assert_eq!(wrap_angle(TAU), 0.0);
    }

    #[test]
    fn origin_angle_of_negative_axis() {
        assert!((origin_angle(dvec2(0.0, -1.0)) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert_eq!(origin_angle(dvec2(0.0, 0.0)), 0.0);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let pts = [dvec2(1.0, 1.0), dvec2(0.0, 0.0), dvec2(1.0, 1.0), dvec2(-0.0, 0.0)];
        assert_eq!(dedup_points(&pts), vec![dvec2(1.0, 1.0), dvec2(0.0, 0.0)]);
    }
}
