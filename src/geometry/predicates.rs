//! Orientation oracle for points on the sphere.
//!
//! [`sign`] reports whether three points wind counter-clockwise (+1),
//! clockwise (-1) or contain a repeated point (0). Well-separated inputs are
//! decided by the floating-point triple product; near-degenerate inputs fall
//! back to a recomputation relative to one of the points and finally to a
//! symbolic perturbation so that only repeated points ever yield 0. Exact
//! arithmetic is not attempted here.

use std::cmp::Ordering;

use super::point::S2Point;

/// Maximum error of the triple product of three unit-length vectors.
const MAX_DET_ERROR: f64 = 1.8274 * f64::EPSILON;

/// Maximum error of the determinant recomputed from edge vectors.
const MAX_STABLE_DET_ERROR: f64 = 32.0 * f64::EPSILON * f64::EPSILON;

/// Returns +1 if `a`, `b`, `c` are counter-clockwise, -1 if clockwise, and 0
/// only if two of the points are identical.
///
/// Satisfies `sign(a, b, c) == sign(b, c, a) == -sign(c, b, a)`.
pub fn sign(a: &S2Point, b: &S2Point, c: &S2Point) -> i32 {
    let det = a.cross(b).dot(c);
    if det > MAX_DET_ERROR {
        return 1;
    }
    if det < -MAX_DET_ERROR {
        return -1;
    }
    expensive_sign(a, b, c)
}

/// Returns true if the edges `oa`, `ob`, `oc` are encountered in that order
/// while sweeping counter-clockwise around `o`.
///
/// If `a == b` or `b == c` the answer is true; otherwise if `a == c` it is
/// false.
pub fn ordered_ccw(a: &S2Point, b: &S2Point, c: &S2Point, o: &S2Point) -> bool {
    let mut sum = 0;
    if sign(b, o, a) >= 0 {
        sum += 1;
    }
    if sign(c, o, b) >= 0 {
        sum += 1;
    }
    if sign(a, o, c) > 0 {
        sum += 1;
    }
    sum >= 2
}

fn expensive_sign(a: &S2Point, b: &S2Point, c: &S2Point) -> i32 {
    if a == b || b == c || c == a {
        return 0;
    }
    let s = stable_sign(a, b, c);
    if s != 0 {
        return s;
    }
    // Sort the points lexicographically, tracking the permutation parity.
    let (mut pa, mut pb, mut pc) = (a, b, c);
    let mut perm_sign = 1;
    if pa.lex_cmp(pb) == Ordering::Greater {
        std::mem::swap(&mut pa, &mut pb);
        perm_sign = -perm_sign;
    }
    if pb.lex_cmp(pc) == Ordering::Greater {
        std::mem::swap(&mut pb, &mut pc);
        perm_sign = -perm_sign;
    }
    if pa.lex_cmp(pb) == Ordering::Greater {
        std::mem::swap(&mut pa, &mut pb);
        perm_sign = -perm_sign;
    }
    perm_sign * symbolically_perturbed_sign(pa, pb, pc)
}

/// Recomputes the determinant from the two edge vectors leaving `a`, which
/// is much more accurate when the points are close together.
fn stable_sign(a: &S2Point, b: &S2Point, c: &S2Point) -> i32 {
    let ab = *b - *a;
    let ac = *c - *a;
    let det = ab.cross(&ac).dot(a);
    let bound = MAX_STABLE_DET_ERROR.max(4.0 * f64::EPSILON * (ab.norm() * ac.norm()));
    if det > bound {
        1
    } else if det < -bound {
        -1
    } else {
        0
    }
}

#[inline]
fn sgn(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Sign of the determinant under an infinitesimal perturbation of the
/// inputs, where larger points are perturbed by smaller amounts.
///
/// REQUIRES: a < b < c in lexicographic order.
fn symbolically_perturbed_sign(a: &S2Point, b: &S2Point, c: &S2Point) -> i32 {
    let bc = b.cross(c);
    let terms = [
        sgn(bc.z),
        sgn(bc.y),
        sgn(bc.x),
        sgn(c.x * a.y - c.y * a.x),
        sgn(c.x),
        -sgn(c.y),
        sgn(c.z * a.x - c.x * a.z),
        sgn(c.z),
        sgn(a.x * b.y - a.y * b.x),
        -sgn(b.x),
        sgn(b.y),
        sgn(a.x),
    ];
    terms.into_iter().find(|&s| s != 0).unwrap_or(1)
}
