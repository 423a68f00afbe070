//! `S2Point`: a point on the unit sphere, stored as a 3-vector.
//!
//! Points are plain `f64` triples. Nothing here enforces unit length; the
//! snapping process that produces graph vertices is expected to hand out
//! normalized points, and [`S2Point::normalize`] is available for callers
//! that build them by hand.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A direction in R^3, interpreted as a point on the unit sphere.
#[derive(Copy, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct S2Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl S2Point {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        S2Point { x, y, z }
    }

    /// Builds a point from raw coordinates and scales it to unit length.
    ///
    /// The zero vector is returned unchanged.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        S2Point::new(x, y, z).normalize()
    }

    #[inline]
    pub fn dot(&self, o: &S2Point) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    #[inline]
    pub fn cross(&self, o: &S2Point) -> S2Point {
        S2Point::new(
            self.y * o.z - self.z * o.y,
            self.z * o.x - self.x * o.z,
            self.x * o.y - self.y * o.x,
        )
    }

    #[inline]
    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Returns this vector scaled to unit length (or unchanged if zero).
    pub fn normalize(&self) -> S2Point {
        let n = self.norm();
        if n == 0.0 { *self } else { *self * (1.0 / n) }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Total lexicographic order on (x, y, z).
    ///
    /// Used to break ties symbolically when an orientation is exactly zero.
    pub fn lex_cmp(&self, o: &S2Point) -> Ordering {
        self.x
            .total_cmp(&o.x)
            .then_with(|| self.y.total_cmp(&o.y))
            .then_with(|| self.z.total_cmp(&o.z))
    }
}

impl Add for S2Point {
    type Output = S2Point;
    #[inline]
    fn add(self, o: S2Point) -> S2Point {
        S2Point::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for S2Point {
    type Output = S2Point;
    #[inline]
    fn sub(self, o: S2Point) -> S2Point {
        S2Point::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for S2Point {
    type Output = S2Point;
    #[inline]
    fn mul(self, k: f64) -> S2Point {
        S2Point::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Neg for S2Point {
    type Output = S2Point;
    #[inline]
    fn neg(self) -> S2Point {
        S2Point::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for S2Point {
    fn from(v: [f64; 3]) -> Self {
        S2Point::new(v[0], v[1], v[2])
    }
}

impl fmt::Debug for S2Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S2Point({}, {}, {})", self.x, self.y, self.z)
    }
}
