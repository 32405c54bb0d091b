//! Euclidean distance between points and segments.
//!
//! Segments may be degenerate (zero length); they then behave as their
//! start point.
use geo::{Coord, GeoFloat, Line};

use crate::line_or_point::LineOrPoint;

#[inline]
pub fn point_distance<T: GeoFloat>(p: Coord<T>, q: Coord<T>) -> T {
    (p.x - q.x).hypot(p.y - q.y)
}

/// The point of `seg` nearest to `p`.
pub fn closest_point<T: GeoFloat>(seg: Line<T>, p: Coord<T>) -> Coord<T> {
    let delta = seg.delta();
    let len2 = delta.x * delta.x + delta.y * delta.y;
    if len2 == T::zero() {
        return seg.start;
    }
    let r = ((p.x - seg.start.x) * delta.x + (p.y - seg.start.y) * delta.y) / len2;
    if r <= T::zero() {
        seg.start
    } else if r >= T::one() {
        seg.end
    } else {
        Coord {
            x: seg.start.x + r * delta.x,
            y: seg.start.y + r * delta.y,
        }
    }
}

pub fn point_segment_distance<T: GeoFloat>(p: Coord<T>, seg: Line<T>) -> T {
    point_distance(p, closest_point(seg, p))
}

/// A common point of the two segments, if any.
fn intersection<T: GeoFloat>(a: Line<T>, b: Line<T>) -> Option<Coord<T>> {
    let a = LineOrPoint::from(a);
    let b = LineOrPoint::from(b);
    let common = match (a.is_line(), b.is_line()) {
        (_, true) => a.intersect_line(&b),
        (true, false) => b.intersect_line(&a),
        (false, false) => (a == b).then_some(a),
    };
    common.map(|geom| geom.first().coord())
}

/// Closest pair of points, the first on `a` and the second on `b`.
///
/// Intersecting segments yield a common point twice.
pub fn closest_points<T: GeoFloat>(a: Line<T>, b: Line<T>) -> (Coord<T>, Coord<T>) {
    if let Some(c) = intersection(a, b) {
        return (c, c);
    }
    // Disjoint segments: the closest pair involves an end point of one
    // of them.
    let candidates = [
        (closest_point(a, b.start), b.start),
        (closest_point(a, b.end), b.end),
        (a.start, closest_point(b, a.start)),
        (a.end, closest_point(b, a.end)),
    ];
    let mut best = candidates[0];
    let mut best_dist = point_distance(best.0, best.1);
    for &(p, q) in &candidates[1..] {
        let dist = point_distance(p, q);
        if dist < best_dist {
            best = (p, q);
            best_dist = dist;
        }
    }
    best
}

pub fn segment_distance<T: GeoFloat>(a: Line<T>, b: Line<T>) -> T {
    let (p, q) = closest_points(a, b);
    point_distance(p, q)
}
