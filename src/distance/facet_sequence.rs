use geo::{Coord, GeoFloat, Line, Rect};
use itertools::iproduct;

use super::segment::{closest_points, point_distance};

/// A single point, or a run of consecutive line vertices, viewed as a
/// sequence of facets for distance computation.
///
/// A point is a sequence of length one; otherwise facet `i` is the
/// segment from vertex `i` to vertex `i + 1`.
#[derive(Debug, Clone, Copy)]
pub struct FacetSequence<'a, T: GeoFloat> {
    coords: &'a [Coord<T>],
}

/// A point on a facet sequence: the facet (or vertex, for a point
/// sequence) index and the coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetLocation<T: GeoFloat> {
    pub index: usize,
    pub coord: Coord<T>,
}

/// Nearest pair between two facet sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetDistance<T: GeoFloat> {
    pub distance: T,
    pub locations: [FacetLocation<T>; 2],
}

impl<'a, T: GeoFloat> FacetSequence<'a, T> {
    pub fn new(coords: &'a [Coord<T>]) -> Self {
        debug_assert!(!coords.is_empty(), "facet sequence must have a vertex");
        FacetSequence { coords }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The `i`-th vertex.
    ///
    /// # Panics
    ///
    /// If `i` is not less than [`len`](Self::len).
    pub fn coord(&self, i: usize) -> Coord<T> {
        self.coords[i]
    }

    pub fn is_point(&self) -> bool {
        self.coords.len() == 1
    }

    pub fn envelope(&self) -> Rect<T> {
        let first = self.coords[0];
        let (min, max) = self.coords[1..].iter().fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Rect::new(min, max)
    }

    fn num_facets(&self) -> usize {
        if self.is_point() {
            1
        } else {
            self.coords.len() - 1
        }
    }

    // A point is its own degenerate facet.
    fn facet(&self, i: usize) -> Line<T> {
        if self.is_point() {
            Line::new(self.coords[0], self.coords[0])
        } else {
            Line::new(self.coords[i], self.coords[i + 1])
        }
    }

    /// Minimum distance to `other`; NaN if it cannot be computed (a
    /// non-finite ordinate).
    pub fn distance(&self, other: &Self) -> T {
        self.nearest(other).map_or_else(T::nan, |n| n.distance)
    }

    /// The nearest pair of points, on `self` and on `other` in that
    /// order.
    pub fn nearest_locations(&self, other: &Self) -> Option<[FacetLocation<T>; 2]> {
        self.nearest(other).map(|n| n.locations)
    }

    pub fn nearest(&self, other: &Self) -> Option<FacetDistance<T>> {
        self.nearest_within(other, T::infinity(), T::zero())
    }

    /// Search for a pair strictly closer than `bound`, returning the
    /// closest found.
    ///
    /// Stops at the first pair within `terminate`; the result is then
    /// only guaranteed to be within `terminate`, not minimal.
    pub fn nearest_within(&self, other: &Self, bound: T, terminate: T) -> Option<FacetDistance<T>> {
        let mut best = None;
        let mut min = bound;
        for (i, j) in iproduct!(0..self.num_facets(), 0..other.num_facets()) {
            let (p, q) = closest_points(self.facet(i), other.facet(j));
            let dist = point_distance(p, q);
            if dist < min {
                min = dist;
                best = Some(FacetDistance {
                    distance: dist,
                    locations: [
                        FacetLocation { index: i, coord: p },
                        FacetLocation { index: j, coord: q },
                    ],
                });
                if min <= terminate {
                    break;
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(pts: &[(f64, f64)]) -> Vec<Coord<f64>> {
        pts.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn accessors() {
        let line = coords(&[(0., 0.), (10., 5.), (3., -2.)]);
        let seq = FacetSequence::new(&line);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_point());
        assert_eq!(seq.coord(1), Coord { x: 10., y: 5. });
        assert_eq!(seq.envelope(), Rect::new((0., -2.), (10., 5.)));

        let pt = coords(&[(1., 1.)]);
        assert!(FacetSequence::new(&pt).is_point());
    }

    #[test]
    fn translated_copy() {
        let line = coords(&[(0., 0.), (10., 0.), (20., 0.), (30., 0.)]);
        let moved = coords(&[(0., 3.), (10., 3.), (20., 3.), (30., 3.)]);
        let a = FacetSequence::new(&line);
        let b = FacetSequence::new(&moved);
        assert_eq!(a.distance(&b), 3.);
        assert_eq!(b.distance(&a), 3.);
    }

    #[test]
    fn indexes_each_sequence_separately() {
        let short = coords(&[(0., 0.), (10., 0.)]);
        let long = coords(&[(50., 50.), (40., 40.), (30., 30.), (5., 1.)]);
        let a = FacetSequence::new(&short);
        let b = FacetSequence::new(&long);
        let nearest = a.nearest(&b).unwrap();
        assert_eq!(nearest.distance, 1.);
        assert_eq!(
            nearest.locations,
            [
                FacetLocation {
                    index: 0,
                    coord: Coord { x: 5., y: 0. }
                },
                FacetLocation {
                    index: 2,
                    coord: Coord { x: 5., y: 1. }
                },
            ]
        );
    }

    #[test]
    fn points_and_lines() {
        let line = coords(&[(0., 0.), (10., 0.), (10., 10.)]);
        let pt = coords(&[(13., 14.)]);
        let other = coords(&[(16., 18.)]);
        let line = FacetSequence::new(&line);
        let pt = FacetSequence::new(&pt);
        let other = FacetSequence::new(&other);

        assert_eq!(line.distance(&pt), 5.);
        let [on_pt, on_line] = pt.nearest_locations(&line).unwrap();
        assert_eq!(on_pt.index, 0);
        assert_eq!(on_line.index, 1);
        assert_eq!(on_line.coord, Coord { x: 10., y: 10. });
        assert_eq!(pt.distance(&other), 5.);
    }

    #[test]
    fn stops_within_terminate_distance() {
        let a = coords(&[(0., 0.), (10., 0.), (20., 0.)]);
        let b = coords(&[(5., 4.), (15., 2.)]);
        let a = FacetSequence::new(&a);
        let b = FacetSequence::new(&b);
        assert_eq!(a.nearest(&b).unwrap().distance, 2.);
        let early = a.nearest_within(&b, f64::INFINITY, 10.).unwrap();
        assert!(early.distance <= 10.);
        assert!(a.nearest_within(&b, 1., 0.).is_none());
    }
}
