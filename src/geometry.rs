//! Exact integer point-in-polygon predicate.
//!
//! Implements edge-membership plus horizontal ray casting over signed
//! fixed-point integers. All arithmetic is exact 64-bit signed integer; no
//! floating point anywhere in this module.

use crate::coordinate::{Coordinate, Triangle};

/// `true` iff `p` lies on the closed segment `(a, b)` — within the bounding
/// box and exactly collinear.
fn on_edge(p: (i64, i64), a: (i64, i64), b: (i64, i64)) -> bool {
    let (x, y) = p;
    let (x1, y1) = a;
    let (x2, y2) = b;

    let within_box = x1.min(x2) <= x && x <= x1.max(x2) && y1.min(y2) <= y && y <= y1.max(y2);
    if !within_box {
        return false;
    }

    let lhs = (x2 - x1) * (y - y1);
    let rhs = (x - x1) * (y2 - y1);
    lhs == rhs
}

/// One ray-casting step for edge `(vj, vi)` against query point `(x, y)`.
/// Returns `true` iff this edge flips the inside/outside accumulator.
fn ray_flip(query: (i64, i64), vj: (i64, i64), vi: (i64, i64)) -> bool {
    let (x, y) = query;
    let (xj, yj) = vj;
    let (xi, yi) = vi;

    let straddles = (yi > y) != (yj > y);
    if !straddles {
        return false;
    }

    let denom = yj - yi;
    if denom == 0 {
        // Horizontal edge: membership is handled by `on_edge`, never by a flip.
        return false;
    }

    // Truncating integer division, matching the spec's exact-integer ray cast.
    let intersect_x = xi + (xj - xi) * (y - yi) / denom;
    x < intersect_x
}

/// Classifies whether `point` lies inside (or on the boundary of) `triangle`.
///
/// A point exactly on any edge classifies as inside. Degenerate
/// (zero-area) triangles are rejected at [`Triangle::new`] construction, so
/// this function never has to special-case collinear vertices.
pub fn point_in_triangle(point: &Coordinate, triangle: &Triangle) -> bool {
    let p = (point.longitude.raw(), point.latitude.raw());
    let vertices = [triangle.v1, triangle.v2, triangle.v3];
    let pts: Vec<(i64, i64)> = vertices
        .iter()
        .map(|v| (v.longitude.raw(), v.latitude.raw()))
        .collect();

    for i in 0..3 {
        let a = pts[i];
        let b = pts[(i + 1) % 3];
        if on_edge(p, a, b) {
            return true;
        }
    }

    let mut inside = false;
    for i in 0..3 {
        let j = (i + 2) % 3; // (i - 1) mod 3
        let vi = pts[i];
        let vj = pts[j];
        if ray_flip(p, vj, vi) {
            inside = !inside;
        }
    }
    inside
}
