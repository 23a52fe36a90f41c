//! Affine transformation for the drawing surface's current transform.
//!
//! ## Matrix Layout
//!
//! Coefficients are stored in SVG `matrix(a b c d e f)` order:
//!
//! ```text
//! [a c e]   [x]
//! [b d f] * [y]
//! [0 0 1]   [1]
//! ```
//!
//! ## Composition Convention
//!
//! `lhs * rhs` applies `rhs` first, then `lhs`. The drawing surface
//! post-concatenates, so `translate` followed by `rotate` rotates the shape
//! in the already-translated coordinate system, the way a graphics context
//! does.
//!
//! ## Rotation Convention
//!
//! Positive angles (radians) rotate from the +X axis toward the +Y axis.
//! With the Y axis pointing down this is clockwise on screen, matching
//! SVG's `rotate()`.

use std::ops::{Mul, MulAssign};

use super::types::Point;

/// Coefficients closer to their identity values than this are treated as equal.
const IDENTITY_EPSILON: f64 = 1e-12;

/// A 2D affine transformation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Create a transform from `[a, b, c, d, e, f]`
    pub const fn new(coefficients: [f64; 6]) -> Self {
        let [a, b, c, d, e, f] = coefficients;
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Rotation around the origin.
    ///
    /// Uses the standard 2D rotation matrix:
    /// ```text
    /// x' = x * cos(θ) - y * sin(θ)
    /// y' = x * sin(θ) + y * cos(θ)
    /// ```
    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new([cos, sin, -sin, cos, 0.0, 0.0])
    }

    /// Rotation around an arbitrary pivot point.
    ///
    /// Equivalent to translating the pivot to the origin, rotating, and
    /// translating back.
    pub fn rotate_about(radians: f64, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y)
            * Self::rotate(radians)
            * Self::translate(-pivot.x, -pivot.y)
    }

    /// Shear with `x' = x + shx * y` and `y' = shy * x + y`
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new([1.0, shy, shx, 1.0, 0.0, 0.0])
    }

    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Check if this transform would not produce any visible change.
    pub fn is_identity(&self) -> bool {
        self.coefficients()
            .iter()
            .zip(Self::IDENTITY.coefficients())
            .all(|(v, id)| (v - id).abs() < IDENTITY_EPSILON)
    }

    /// Check if this transform only translates.
    pub fn is_translation(&self) -> bool {
        Affine::new([self.a, self.b, self.c, self.d, 0.0, 0.0]).is_identity()
    }

    /// Apply the transform to a point
    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: self.a * point.x + self.c * point.y + self.e,
            y: self.b * point.x + self.d * point.y + self.f,
        }
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }
}

impl MulAssign for Affine {
    fn mul_assign(&mut self, rhs: Affine) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_identity() {
        let p = Point::new(3.0, -7.0);
        assert!(Affine::IDENTITY.is_identity());
        assert_eq!(Affine::IDENTITY.apply(p), p);
        assert_eq!(Affine::default(), Affine::IDENTITY);
    }

    #[test]
    fn test_90_degree_rotation_around_origin() {
        let result = Affine::rotate(FRAC_PI_2).apply(Point::new(1.0, 0.0));
        assert!(approx_eq(result.x, 0.0), "x: expected 0.0, got {}", result.x);
        assert!(approx_eq(result.y, 1.0), "y: expected 1.0, got {}", result.y);
    }

    #[test]
    fn test_rotation_around_pivot_keeps_pivot_fixed() {
        let pivot = Point::new(50.0, 50.0);
        let t = Affine::rotate_about(0.7, pivot);
        let result = t.apply(pivot);
        assert!(approx_eq(result.x, 50.0));
        assert!(approx_eq(result.y, 50.0));
    }

    #[test]
    fn test_composition_applies_rhs_first() {
        // Scale first, then translate
        let t = Affine::translate(10.0, 20.0) * Affine::scale(2.0, 3.0);
        let result = t.apply(Point::new(1.0, 1.0));
        assert!(approx_eq(result.x, 12.0));
        assert!(approx_eq(result.y, 23.0));

        // Translate first, then scale
        let t = Affine::scale(2.0, 3.0) * Affine::translate(10.0, 20.0);
        let result = t.apply(Point::new(1.0, 1.0));
        assert!(approx_eq(result.x, 22.0));
        assert!(approx_eq(result.y, 63.0));
    }

    #[test]
    fn test_mul_assign_matches_mul() {
        let mut t = Affine::translate(5.0, 5.0);
        t *= Affine::rotate(0.3);
        assert_eq!(t, Affine::translate(5.0, 5.0) * Affine::rotate(0.3));
    }

    #[test]
    fn test_shear() {
        let result = Affine::shear(0.5, 0.0).apply(Point::new(0.0, 10.0));
        assert!(approx_eq(result.x, 5.0));
        assert!(approx_eq(result.y, 10.0));
    }

    #[test]
    fn test_is_translation() {
        assert!(Affine::translate(4.0, 2.0).is_translation());
        assert!(!Affine::translate(4.0, 2.0).is_identity());
        assert!(!Affine::scale(2.0, 2.0).is_translation());
    }
}
