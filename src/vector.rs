//! Minimal 2D vector used for positions, displacements and forces.
//!
//! The in-place methods (`add`, `subtract`, `scale`, `reset`) are what the
//! simulation uses on its accumulation path; the value-returning helpers are
//! for geometry that should not alias an existing vector.

use std::ops::{AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or direction in the layout plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    /// The zero vector ("no displacement").
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }

    pub fn subtract(&mut self, other: Vector2D) {
        self.x -= other.x;
        self.y -= other.y;
    }

    pub fn scale(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }

    pub fn invert(&mut self) {
        self.scale(-1.0);
    }

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Scale to unit length. A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag != 0.0 {
            self.scale(1.0 / mag);
        }
    }

    /// Shorten to at most `max` while keeping the direction.
    pub fn clamp_magnitude(&mut self, max: f64) {
        let mag = self.magnitude();
        if mag > max {
            self.scale(max / mag);
        }
    }

    /// Copy of this vector multiplied by `scalar`.
    pub fn scaled(&self, scalar: f64) -> Vector2D {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    /// Unit vector pointing from `from` to `to`.
    ///
    /// Coincident points yield the zero vector rather than NaN.
    pub fn unit_vector(from: Vector2D, to: Vector2D) -> Vector2D {
        let mut direction = to - from;
        direction.normalize();
        direction
    }

    /// Euclidean distance between two points.
    pub fn distance(p1: Vector2D, p2: Vector2D) -> f64 {
        (p2 - p1).magnitude()
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scaled(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.subtract(rhs);
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2D::new(x, y)
    }
}
