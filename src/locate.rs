//! Point-on-geometry location.
//!
//! A [`PointLocator`] classifies a coordinate as [`Location::Interior`],
//! [`Location::Boundary`] or [`Location::Exterior`] of a geometry. Ring
//! vertices and edges of an areal geometry are always on the boundary.
//!
//! Two flavours are provided:
//!
//! 1. [`IndexedPointInAreaLocator`] is built once for a polygonal
//!    geometry and answers each query by counting ray crossings over
//!    the ring segments found in an R-tree.
//!
//! 1. [`SimplePointLocator`] does no pre-processing, and locates
//!    against any geometry type, member by member. Use it for one-shot
//!    queries.
use geo::{
    coordinate_position::{CoordPos, CoordinatePosition},
    kernels::{Kernel, Orientation},
    BoundingRect, Coord, GeoFloat, Geometry, Line, Point, Rect,
};
use log::debug;
use rstar::{RTree, SelectionFunction, AABB};

use crate::{
    components::Components, envelope, line_or_point::LineOrPoint, sweep_point::SweepPoint,
};

/// Topological location of a point relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl From<CoordPos> for Location {
    fn from(pos: CoordPos) -> Self {
        match pos {
            CoordPos::Inside => Location::Interior,
            CoordPos::OnBoundary => Location::Boundary,
            CoordPos::Outside => Location::Exterior,
        }
    }
}

/// Interface for types that classify points against a fixed geometry.
pub trait PointLocator<T: GeoFloat> {
    fn locate(&self, coord: &Coord<T>) -> Location;
}

/// Unindexed locator for a geometry of any type.
///
/// Each member of a multi-geometry or collection is located on its own
/// and the results are combined: a point in some member interior is
/// interior, and boundaries follow the mod-2 rule, so an end point
/// shared by two lines (or a corner shared by two shells) counts as
/// interior rather than exterior. Points are interior to a puntal
/// geometry.
#[derive(Debug, Clone, Copy)]
pub struct SimplePointLocator<'a, T: GeoFloat>(&'a Geometry<T>);

impl<'a, T: GeoFloat> SimplePointLocator<'a, T> {
    pub fn new(geom: &'a Geometry<T>) -> Self {
        SimplePointLocator(geom)
    }
}

impl<'a, T: GeoFloat> PointLocator<T> for SimplePointLocator<'a, T> {
    fn locate(&self, coord: &Coord<T>) -> Location {
        let mut info = LocationInfo::default();
        info.visit(self.0, coord);
        info.location()
    }
}

#[derive(Debug, Default)]
struct LocationInfo {
    interior: bool,
    boundaries: usize,
}

impl LocationInfo {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.interior = true,
            Location::Boundary => self.boundaries += 1,
            Location::Exterior => {}
        }
    }

    fn location(&self) -> Location {
        if self.boundaries % 2 == 1 {
            Location::Boundary
        } else if self.interior || self.boundaries > 0 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    fn visit<T: GeoFloat>(&mut self, geom: &Geometry<T>, coord: &Coord<T>) {
        match geom {
            Geometry::Point(p) => self.update(locate_on_point(p, coord)),
            Geometry::MultiPoint(mp) => mp
                .iter()
                .for_each(|p| self.update(locate_on_point(p, coord))),
            Geometry::Line(l) => self.update(locate_on_line(&[l.start, l.end], coord)),
            Geometry::LineString(ls) => self.update(locate_on_line(&ls.0, coord)),
            Geometry::MultiLineString(mls) => {
                mls.iter().for_each(|ls| self.update(locate_on_line(&ls.0, coord)))
            }
            Geometry::Polygon(poly) => self.update(poly.coordinate_position(coord).into()),
            Geometry::MultiPolygon(mp) => mp
                .iter()
                .for_each(|poly| self.update(poly.coordinate_position(coord).into())),
            Geometry::Rect(r) => self.update(r.coordinate_position(coord).into()),
            Geometry::Triangle(t) => self.update(t.coordinate_position(coord).into()),
            Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.visit(g, coord)),
        }
    }
}

fn locate_on_point<T: GeoFloat>(p: &Point<T>, coord: &Coord<T>) -> Location {
    if p.0 == *coord {
        Location::Interior
    } else {
        Location::Exterior
    }
}

// End points of an open line are its boundary; a closed line has none.
fn locate_on_line<T: GeoFloat>(coords: &[Coord<T>], coord: &Coord<T>) -> Location {
    let (first, last) = match (coords.first(), coords.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Location::Exterior,
    };
    if first != last && (first == coord || last == coord) {
        return Location::Boundary;
    }
    let pt = SweepPoint::from(*coord);
    let on_line = coords.iter().any(|c| c == coord)
        || coords
            .windows(2)
            .any(|w| LineOrPoint::from(Line::new(w[0], w[1])).contains_point(pt));
    if on_line {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Selects ring segments whose y-extent contains a given ordinate,
/// i.e. those that may cross a horizontal ray through the query point.
struct HorizontalRay<T: GeoFloat> {
    y: T,
}

impl<T: GeoFloat> SelectionFunction<Line<T>> for HorizontalRay<T> {
    fn should_unpack_parent(&self, envelope: &AABB<Point<T>>) -> bool {
        envelope.lower().y() <= self.y && self.y <= envelope.upper().y()
    }

    fn should_unpack_leaf(&self, leaf: &Line<T>) -> bool {
        let (min_y, max_y) = if leaf.start.y < leaf.end.y {
            (leaf.start.y, leaf.end.y)
        } else {
            (leaf.end.y, leaf.start.y)
        };
        min_y <= self.y && self.y <= max_y
    }
}

/// Locates points in a polygonal geometry using an R-tree over its ring
/// segments.
///
/// The index is read-only once built, so a locator can be shared across
/// threads.
pub struct IndexedPointInAreaLocator<T: GeoFloat> {
    bounds: Option<Rect<T>>,
    index: RTree<Line<T>>,
}

impl<T: GeoFloat> std::fmt::Debug for IndexedPointInAreaLocator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedPointInAreaLocator")
            .field("bounds", &self.bounds)
            .field("segments", &self.index.size())
            .finish()
    }
}

impl<T: GeoFloat> IndexedPointInAreaLocator<T> {
    /// Build the locator. Only the polygonal components of `geom` are
    /// indexed.
    pub fn new(geom: &Geometry<T>) -> Self {
        let components = Components::new(geom);
        let segments: Vec<Line<T>> = components
            .polygons
            .iter()
            .flat_map(|poly| {
                std::iter::once(poly.exterior())
                    .chain(poly.interiors())
                    .flat_map(|ring| ring.lines())
            })
            .collect();
        let bounds = components
            .polygons
            .iter()
            .filter_map(|poly| poly.bounding_rect())
            .reduce(|acc, r| envelope::merge(&acc, &r));
        debug!(
            "indexed point locator: {num} ring segments",
            num = segments.len()
        );
        IndexedPointInAreaLocator {
            bounds,
            index: RTree::bulk_load(segments),
        }
    }
}

impl<T: GeoFloat> PointLocator<T> for IndexedPointInAreaLocator<T> {
    fn locate(&self, coord: &Coord<T>) -> Location {
        match &self.bounds {
            Some(b) if envelope::contains_coord(b, coord) => {}
            _ => return Location::Exterior,
        }
        let mut counter = RayCrossingCounter::new(*coord);
        for segment in self
            .index
            .locate_with_selection_function(HorizontalRay { y: coord.y })
        {
            counter.count_segment(segment.start, segment.end);
            if counter.is_on_segment() {
                break;
            }
        }
        counter.location()
    }
}

/// Counts crossings of a ray, extending to the right of a point, with a
/// set of segments forming one or more rings.
///
/// Uses the half-open rule on segment end points so every vertex is
/// counted exactly once, and orientation predicates from the robust
/// kernel for the crossing test.
#[derive(Debug, Clone, Copy)]
pub struct RayCrossingCounter<T: GeoFloat> {
    point: Coord<T>,
    crossings: usize,
    on_segment: bool,
}

impl<T: GeoFloat> RayCrossingCounter<T> {
    pub fn new(point: Coord<T>) -> Self {
        RayCrossingCounter {
            point,
            crossings: 0,
            on_segment: false,
        }
    }

    pub fn count_segment(&mut self, p1: Coord<T>, p2: Coord<T>) {
        let p = self.point;

        // Segment strictly to the left of the point.
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p == p1 || p == p2 {
            self.on_segment = true;
            return;
        }
        // Horizontal segment on the ray line.
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = if p1.x < p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
            if min_x <= p.x && p.x <= max_x {
                self.on_segment = true;
            }
            return;
        }
        // Half-open: the upper end point is excluded.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orientation = T::Ker::orient2d(p1, p2, p);
            if orientation == Orientation::Collinear {
                self.on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orientation = match orientation {
                    Orientation::CounterClockwise => Orientation::Clockwise,
                    _ => Orientation::CounterClockwise,
                };
            }
            if orientation == Orientation::CounterClockwise {
                self.crossings += 1;
            }
        }
    }

    #[inline]
    pub fn is_on_segment(&self) -> bool {
        self.on_segment
    }

    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}
