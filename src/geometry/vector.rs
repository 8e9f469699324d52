use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};

use super::EPSILON;
use crate::error::GeometryError;

/// Immutable 2D point/displacement value. Every operation returns a new
/// vector; nothing is mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0., y: 0. };
    pub const LEFT: Vec2 = Vec2 { x: -1., y: 0. };
    pub const RIGHT: Vec2 = Vec2 { x: 1., y: 0. };
    pub const UP: Vec2 = Vec2 { x: 0., y: 1. };
    pub const DOWN: Vec2 = Vec2 { x: 0., y: -1. };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Componentwise division by a scalar. Dividing by exactly zero has no
    /// geometric meaning, so it is reported as an error instead of leaking
    /// Infinity/NaN components into later computations.
    pub fn divide(self, k: f64) -> Result<Vec2, GeometryError> {
        if k == 0. {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Vec2::new(self.x / k, self.y / k))
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Vector of length 1 with the same direction as this vector. The zero
    /// vector normalizes to itself; displacement vectors collapse to zero
    /// often enough that this must not be an error.
    pub fn unit(self) -> Vec2 {
        let length = self.length();
        if length == 0. {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / length, self.y / length)
        }
    }

    /// The vector rotated 90 degrees counter-clockwise, `(-y, x)`. Same
    /// length as the input, not normalized.
    pub fn normal(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Dot product.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Angle between two vectors in radians, in `[0, pi]`. Zero-length
    /// inputs yield 0 rather than an error, matching `unit`.
    pub fn angle_between(self, other: Vec2) -> f64 {
        let lengths = self.length() * other.length();
        if lengths == 0. {
            return 0.;
        }
        // the cosine can drift an ulp past 1 for near-parallel inputs
        (self.dot(other) / lengths).clamp(-1., 1.).acos()
    }

    /// Orthogonal projection of this vector onto `target`. Projecting onto
    /// the zero vector yields the zero vector.
    pub fn project_onto(self, target: Vec2) -> Vec2 {
        let denom = target.dot(target);
        if denom == 0. {
            return Vec2::ZERO;
        }
        target * (self.dot(target) / denom)
    }

    /// Tolerance comparison: each coordinate must differ by less than
    /// [`EPSILON`]. Not transitive across chains of near-equal values.
    /// The derived `PartialEq` stays bitwise for exact comparisons.
    pub fn approx_eq(self, other: Vec2) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    /// Stable hash over the bit patterns of both coordinates. Near-equal
    /// floats that are not bitwise-equal may hash differently, so this is
    /// no substitute for [`Vec2::approx_eq`] in a hash-based container.
    pub fn hash_value(self) -> u64 {
        self.x.to_bits().wrapping_mul(73856093) ^ self.y.to_bits().wrapping_mul(19349663)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod vector_tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1., 2.);
        let b = Vec2::new(-3., 0.5);
        assert_eq!(a + b, Vec2::new(-2., 2.5));
        assert_eq!(a - b, Vec2::new(4., 1.5));
        assert_eq!(-a, Vec2::new(-1., -2.));
        assert_eq!(a * 2., Vec2::new(2., 4.));
        assert_eq!(a * 0., Vec2::ZERO);
        assert_eq!(a * -1., -a);
    }

    #[test]
    fn divide_by_nonzero() {
        let v = Vec2::new(3., -9.).divide(3.).unwrap();
        assert_eq!(v, Vec2::new(1., -3.));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        assert_eq!(
            Vec2::new(1., 2.).divide(0.),
            Err(GeometryError::DivisionByZero)
        );
    }

    #[test]
    fn length_of_pythagorean_triple() {
        assert_abs_diff_eq!(Vec2::new(3., 4.).length(), 5.);
        assert_eq!(Vec2::ZERO.length(), 0.);
    }

    #[test]
    fn unit_has_length_one() {
        for v in [
            Vec2::new(3., 4.),
            Vec2::new(-0.001, 17.),
            Vec2::new(1e6, -1e6),
        ] {
            assert_abs_diff_eq!(v.unit().length(), 1., epsilon = EPSILON);
        }
    }

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
    }

    #[test]
    fn normal_is_perpendicular_and_same_length() {
        let v = Vec2::new(3., 4.);
        let n = v.normal();
        assert_eq!(n, Vec2::new(-4., 3.));
        assert_eq!(v.dot(n), 0.);
        assert_abs_diff_eq!(n.length(), v.length());
    }

    #[test]
    fn angle_between_perpendicular() {
        let angle = Vec2::RIGHT.angle_between(Vec2::UP);
        assert_abs_diff_eq!(angle, std::f64::consts::FRAC_PI_2, epsilon = EPSILON);
    }

    #[test]
    fn angle_between_opposite() {
        let angle = Vec2::RIGHT.angle_between(Vec2::LEFT);
        assert_abs_diff_eq!(angle, std::f64::consts::PI, epsilon = EPSILON);
    }

    #[test]
    fn angle_between_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.angle_between(Vec2::UP), 0.);
        assert_eq!(Vec2::UP.angle_between(Vec2::ZERO), 0.);
    }

    #[test]
    fn angle_between_near_parallel_does_not_nan() {
        // dot/(|a||b|) lands a hair above 1.0 for these
        let a = Vec2::new(1., 1e-8);
        let angle = a.angle_between(a);
        assert!(angle.is_finite());
        assert_abs_diff_eq!(angle, 0., epsilon = 1e-6);
    }

    #[test]
    fn projection_onto_axis() {
        let p = Vec2::new(3., 4.).project_onto(Vec2::new(10., 0.));
        assert!(p.approx_eq(Vec2::new(3., 0.)));
    }

    #[test]
    fn projection_onto_diagonal() {
        let p = Vec2::new(2., 0.).project_onto(Vec2::new(1., 1.));
        assert!(p.approx_eq(Vec2::new(1., 1.)));
    }

    #[test]
    fn projection_onto_zero_is_zero() {
        assert_eq!(Vec2::new(2., 3.).project_onto(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn approx_eq_within_tolerance() {
        let a = Vec2::new(1., 1.);
        assert!(a.approx_eq(Vec2::new(1. + EPSILON / 2., 1. - EPSILON / 2.)));
        assert!(!a.approx_eq(Vec2::new(1. + EPSILON * 2., 1.)));
    }

    #[test]
    fn hash_differs_for_near_equal_values() {
        let a = Vec2::new(0.1 + 0.2, 1.);
        let b = Vec2::new(0.3, 1.);
        assert!(a.approx_eq(b));
        // tolerance-equal but not bitwise-equal, so the hashes diverge
        assert_ne!(a.hash_value(), b.hash_value());
    }

    #[test]
    fn hash_stable_for_identical_values() {
        let a = Vec2::new(12.5, -7.25);
        assert_eq!(a.hash_value(), Vec2::new(12.5, -7.25).hash_value());
    }

    #[test]
    fn display_format() {
        assert_eq!(Vec2::new(1.5, -2.).to_string(), "(1.5,-2)");
    }
}
