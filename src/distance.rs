//! Minimum distance and nearest points between two geometries.
//!
//! [`DistanceOp`] runs the search in two phases:
//!
//! 1. Containment. If either side has polygons, one vertex of every
//!    connected element of the other side is located in them. A vertex
//!    inside (or on) a polygon means the distance is zero.
//!
//! 1. Facets. Both sides are decomposed into lines (line strings and
//!    polygon rings) and points, and all pairs are compared: lines with
//!    lines, lines with points, then points with points. Pairs whose
//!    envelopes are further apart than the current minimum are skipped.
//!
//! Either phase stops as soon as the minimum falls to the terminate
//! distance (zero unless set), which is what makes
//! [`is_within_distance`] cheaper than [`distance`].
//!
//! ```rust
//! use geo::{polygon, Geometry};
//! use geo_prepared::distance::DistanceOp;
//!
//! let a: Geometry<f64> =
//!     polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.)].into();
//! let b: Geometry<f64> =
//!     polygon![(x: 4., y: 0.), (x: 5., y: 0.), (x: 5., y: 1.), (x: 4., y: 1.)].into();
//! let mut op = DistanceOp::new(&a, &b);
//! assert_eq!(op.distance(), 3.);
//! let (p, q) = op.nearest_points().unwrap();
//! assert_eq!((p.x, q.x), (1., 4.));
//! ```
pub mod segment;

mod facet_sequence;
pub use facet_sequence::{FacetDistance, FacetLocation, FacetSequence};

mod location;
pub use location::{Component, GeometryLocation};

use geo::{
    coordinate_position::{CoordPos, CoordinatePosition},
    Coord, GeoFloat, Geometry, Point, Rect,
};
use itertools::iproduct;
use log::debug;

use crate::{
    components::{envelope, Components},
    envelope as env,
};
use segment::point_distance;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Nearest<T: GeoFloat> {
    distance: T,
    locations: Option<[GeometryLocation<T>; 2]>,
}

/// Computes the distance and nearest points between two geometries.
///
/// The result is computed on the first query and cached; later calls
/// return it without searching again.
#[derive(Debug)]
pub struct DistanceOp<'a, T: GeoFloat> {
    geoms: [&'a Geometry<T>; 2],
    terminate_distance: T,
    result: Option<Nearest<T>>,
}

impl<'a, T: GeoFloat> DistanceOp<'a, T> {
    pub fn new(a: &'a Geometry<T>, b: &'a Geometry<T>) -> Self {
        Self::with_terminate_distance(a, b, T::zero())
    }

    /// Stop searching once a pair within `terminate_distance` is
    /// found. The reported distance is then at most
    /// `terminate_distance`, but may not be the minimum.
    pub fn with_terminate_distance(
        a: &'a Geometry<T>,
        b: &'a Geometry<T>,
        terminate_distance: T,
    ) -> Self {
        DistanceOp {
            geoms: [a, b],
            terminate_distance,
            result: None,
        }
    }

    /// Distance between the geometries; zero if either is empty.
    pub fn distance(&mut self) -> T {
        self.compute().distance
    }

    /// Nearest locations, on the first and second geometry in that
    /// order. `None` if either is empty.
    pub fn nearest_locations(&mut self) -> Option<[GeometryLocation<T>; 2]> {
        self.compute().locations
    }

    /// Nearest points, on the first and second geometry in that order.
    /// `None` if either is empty.
    pub fn nearest_points(&mut self) -> Option<(Coord<T>, Coord<T>)> {
        self.nearest_locations()
            .map(|[a, b]| (a.coord(), b.coord()))
    }

    fn compute(&mut self) -> Nearest<T> {
        if let Some(result) = self.result {
            return result;
        }
        let result = self.search();
        self.result = Some(result);
        result
    }

    fn search(&self) -> Nearest<T> {
        let components = [Components::new(self.geoms[0]), Components::new(self.geoms[1])];
        if components.iter().any(|c| c.is_empty()) {
            debug!("distance: empty input");
            return Nearest {
                distance: T::zero(),
                locations: None,
            };
        }

        let mut search = Search {
            min_distance: T::infinity(),
            locations: None,
            terminate_distance: self.terminate_distance,
        };
        search.containment(&components);
        if !search.is_done() {
            search.facets(&components);
        }
        debug!(
            "distance: {dist:?} (terminate at {term:?})",
            dist = search.min_distance,
            term = self.terminate_distance
        );
        match search.locations {
            Some(locations) => Nearest {
                distance: search.min_distance,
                locations: Some(locations),
            },
            // Only non-finite ordinates leave every pair unmeasured.
            None => Nearest {
                distance: T::nan(),
                locations: None,
            },
        }
    }
}

/// Mutable state of one distance search.
struct Search<T: GeoFloat> {
    min_distance: T,
    locations: Option<[GeometryLocation<T>; 2]>,
    terminate_distance: T,
}

type LineFacets<'c, T> = Vec<(usize, FacetSequence<'c, T>, Rect<T>)>;

fn line_facets<'c, T: GeoFloat>(components: &'c Components<'_, T>) -> LineFacets<'c, T> {
    components
        .lines
        .iter()
        .enumerate()
        .filter(|(_, ls)| !ls.0.is_empty())
        .map(|(idx, ls)| {
            let facets = FacetSequence::new(&ls.0);
            (idx, facets, facets.envelope())
        })
        .collect()
}

/// One vertex for each connected element: every point, and the first
/// vertex of every line and ring.
fn connected_element_locations<'c, T: GeoFloat>(
    components: &'c Components<'_, T>,
) -> impl Iterator<Item = GeometryLocation<T>> + 'c {
    let points = components
        .points
        .iter()
        .enumerate()
        .map(|(idx, p)| GeometryLocation::new(Component::Point(idx), 0, p.0));
    let lines = components
        .lines
        .iter()
        .enumerate()
        .filter_map(|(idx, ls)| {
            ls.0.first()
                .map(|c| GeometryLocation::new(Component::Line(idx), 0, *c))
        });
    points.chain(lines)
}

impl<T: GeoFloat> Search<T> {
    #[inline]
    fn is_done(&self) -> bool {
        self.min_distance <= self.terminate_distance
    }

    fn update(&mut self, distance: T, locations: [GeometryLocation<T>; 2]) {
        self.min_distance = distance;
        self.locations = Some(locations);
    }

    fn containment(&mut self, components: &[Components<'_, T>; 2]) {
        for poly_side in 0..2 {
            let polygons = &components[poly_side].polygons;
            if polygons.is_empty() {
                continue;
            }
            for loc in connected_element_locations(&components[1 - poly_side]) {
                let coord = loc.coord();
                let inside = polygons
                    .iter()
                    .position(|poly| poly.coordinate_position(&coord) != CoordPos::Outside);
                if let Some(idx) = inside {
                    debug!("distance: {coord:?} lies in polygon {idx}");
                    let in_area = GeometryLocation::inside_area(idx, coord);
                    let locations = if poly_side == 0 {
                        [in_area, loc]
                    } else {
                        [loc, in_area]
                    };
                    self.update(T::zero(), locations);
                    return;
                }
            }
        }
    }

    fn facets(&mut self, components: &[Components<'_, T>; 2]) {
        let lines = [line_facets(&components[0]), line_facets(&components[1])];
        let points = [&components[0].points, &components[1].points];

        self.line_line(&lines[0], &lines[1]);
        if self.is_done() {
            return;
        }
        self.line_point(&lines[0], points[1], false);
        if self.is_done() {
            return;
        }
        self.line_point(&lines[1], points[0], true);
        if self.is_done() {
            return;
        }
        self.point_point(points[0], points[1]);
    }

    fn line_line(&mut self, a: &LineFacets<'_, T>, b: &LineFacets<'_, T>) {
        for ((i, fa, ea), (j, fb, eb)) in iproduct!(a.iter(), b.iter()) {
            if env::distance(ea, eb) > self.min_distance {
                continue;
            }
            let nearest = fa.nearest_within(fb, self.min_distance, self.terminate_distance);
            if let Some(nearest) = nearest {
                let [la, lb] = nearest.locations;
                self.update(
                    nearest.distance,
                    [
                        GeometryLocation::new(Component::Line(*i), la.index, la.coord),
                        GeometryLocation::new(Component::Line(*j), lb.index, lb.coord),
                    ],
                );
                if self.is_done() {
                    return;
                }
            }
        }
    }

    /// Compare lines with points; `flip` when the lines belong to the
    /// second geometry.
    fn line_point(&mut self, lines: &LineFacets<'_, T>, points: &[Point<T>], flip: bool) {
        for ((i, facets, bounds), (j, pt)) in iproduct!(lines.iter(), points.iter().enumerate()) {
            if env::distance_to_coord(bounds, &pt.0) > self.min_distance {
                continue;
            }
            let point_facet = FacetSequence::new(std::slice::from_ref(&pt.0));
            let nearest =
                facets.nearest_within(&point_facet, self.min_distance, self.terminate_distance);
            if let Some(nearest) = nearest {
                let [on_line, _] = nearest.locations;
                let on_line =
                    GeometryLocation::new(Component::Line(*i), on_line.index, on_line.coord);
                let on_point = GeometryLocation::new(Component::Point(j), 0, pt.0);
                let locations = if flip {
                    [on_point, on_line]
                } else {
                    [on_line, on_point]
                };
                self.update(nearest.distance, locations);
                if self.is_done() {
                    return;
                }
            }
        }
    }

    fn point_point(&mut self, a: &[Point<T>], b: &[Point<T>]) {
        for ((i, pa), (j, pb)) in iproduct!(a.iter().enumerate(), b.iter().enumerate()) {
            let dist = point_distance(pa.0, pb.0);
            if dist < self.min_distance {
                self.update(
                    dist,
                    [
                        GeometryLocation::new(Component::Point(i), 0, pa.0),
                        GeometryLocation::new(Component::Point(j), 0, pb.0),
                    ],
                );
                if self.is_done() {
                    return;
                }
            }
        }
    }
}

/// Distance between two geometries; zero if either is empty.
pub fn distance<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> T {
    DistanceOp::new(a, b).distance()
}

/// Whether the geometries are within `max_distance` of each other.
///
/// Always `false` if either geometry is empty.
pub fn is_within_distance<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>, max_distance: T) -> bool {
    match (envelope(a), envelope(b)) {
        (Some(ea), Some(eb)) if env::distance(&ea, &eb) <= max_distance => {}
        _ => return false,
    }
    DistanceOp::with_terminate_distance(a, b, max_distance).distance() <= max_distance
}

/// Nearest points, on `a` and on `b` in that order; `None` if either
/// geometry is empty.
pub fn nearest_points<T: GeoFloat>(
    a: &Geometry<T>,
    b: &Geometry<T>,
) -> Option<(Coord<T>, Coord<T>)> {
    DistanceOp::new(a, b).nearest_points()
}
