//! Axis-aligned envelope tests used to short-circuit predicates and
//! prune the distance search. All tests treat the envelope as closed.
use geo::{Coord, CoordNum, GeoFloat, Rect};

/// Whether `outer` covers `inner` (boundaries may touch).
#[inline]
pub fn covers<T: CoordNum>(outer: &Rect<T>, inner: &Rect<T>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && inner.max().x <= outer.max().x
        && inner.max().y <= outer.max().y
}

/// Whether the envelopes share at least one point.
#[inline]
pub fn intersects<T: CoordNum>(a: &Rect<T>, b: &Rect<T>) -> bool {
    a.min().x <= b.max().x
        && b.min().x <= a.max().x
        && a.min().y <= b.max().y
        && b.min().y <= a.max().y
}

/// Whether the envelope contains the coordinate, boundary included.
#[inline]
pub fn contains_coord<T: CoordNum>(rect: &Rect<T>, c: &Coord<T>) -> bool {
    rect.min().x <= c.x && c.x <= rect.max().x && rect.min().y <= c.y && c.y <= rect.max().y
}

/// Smallest envelope covering both.
pub fn merge<T: GeoFloat>(a: &Rect<T>, b: &Rect<T>) -> Rect<T> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// Euclidean distance between two envelopes; zero if they intersect.
pub fn distance<T: GeoFloat>(a: &Rect<T>, b: &Rect<T>) -> T {
    let gap = |a_min: T, a_max: T, b_min: T, b_max: T| {
        if a_max < b_min {
            b_min - a_max
        } else if b_max < a_min {
            a_min - b_max
        } else {
            T::zero()
        }
    };
    let dx = gap(a.min().x, a.max().x, b.min().x, b.max().x);
    let dy = gap(a.min().y, a.max().y, b.min().y, b.max().y);
    dx.hypot(dy)
}

/// Distance from an envelope to a coordinate; zero if it is covered.
#[inline]
pub fn distance_to_coord<T: GeoFloat>(rect: &Rect<T>, c: &Coord<T>) -> T {
    distance(rect, &Rect::new(*c, *c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new((x0, y0), (x1, y1))
    }

    #[test]
    fn relations() {
        let a = rect(0., 0., 10., 10.);
        assert!(covers(&a, &rect(0., 0., 10., 5.)));
        assert!(!covers(&a, &rect(-1., 0., 5., 5.)));
        assert!(intersects(&a, &rect(10., 10., 20., 20.)));
        assert!(!intersects(&a, &rect(10.5, 0., 20., 20.)));
        assert!(contains_coord(&a, &Coord { x: 10., y: 0. }));
        assert!(!contains_coord(&a, &Coord { x: 10., y: -0.1 }));
        assert_eq!(merge(&a, &rect(5., -5., 20., 5.)), rect(0., -5., 20., 10.));
    }

    #[test]
    fn distances() {
        let a = rect(0., 0., 1., 1.);
        assert_eq!(distance(&a, &rect(0.5, 0.5, 3., 3.)), 0.);
        assert_eq!(distance(&a, &rect(101., 0., 102., 1.)), 100.);
        assert_eq!(distance(&a, &rect(4., 5., 6., 6.)), 5.);
        assert_eq!(distance_to_coord(&a, &Coord { x: -3., y: 5. }), 5.);
        assert_eq!(distance_to_coord(&a, &Coord { x: 0.5, y: 0.5 }), 0.);
    }
}
