//! Predicates against an axis-aligned rectangle target.
//!
//! A rectangle is convex and equal to its envelope, so containment
//! reduces to envelope tests and intersection to a handful of edge
//! tests, with no index required.
use geo::{
    line_intersection::line_intersection, BoundingRect, Coord, CoordsIter, GeoFloat, Geometry,
    Polygon, Rect,
};

use crate::{
    components::{envelope, is_areal, Components},
    envelope as env,
    locate::{Location, PointLocator, SimplePointLocator},
};

/// Whether the polygon is an axis-aligned rectangle: a single shell of
/// five vertices, each on a corner of the envelope, with every edge
/// either horizontal or vertical.
pub fn is_rectangle<T: GeoFloat>(poly: &Polygon<T>) -> bool {
    if !poly.interiors().is_empty() {
        return false;
    }
    let shell = &poly.exterior().0;
    if shell.len() != 5 {
        return false;
    }
    let bounds = match poly.bounding_rect() {
        Some(b) => b,
        None => return false,
    };
    let on_corner = |c: &Coord<T>| {
        (c.x == bounds.min().x || c.x == bounds.max().x)
            && (c.y == bounds.min().y || c.y == bounds.max().y)
    };
    if !shell.iter().all(on_corner) {
        return false;
    }
    shell.windows(2).all(|w| {
        let x_changed = w[0].x != w[1].x;
        let y_changed = w[0].y != w[1].y;
        x_changed != y_changed
    })
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rectangle<T: GeoFloat> {
    rect: Rect<T>,
}

impl<T: GeoFloat> Rectangle<T> {
    pub fn new(rect: Rect<T>) -> Self {
        Rectangle { rect }
    }

    pub fn covers(&self, test: &Geometry<T>) -> bool {
        match envelope(test) {
            Some(e) => env::covers(&self.rect, &e),
            None => false,
        }
    }

    /// Covered, and not lying wholly on the boundary.
    pub fn contains(&self, test: &Geometry<T>) -> bool {
        self.covers(test) && !self.is_contained_in_boundary(test)
    }

    pub fn intersects(&self, test: &Geometry<T>) -> bool {
        match envelope(test) {
            Some(e) if env::intersects(&self.rect, &e) => {}
            _ => return false,
        }
        if test
            .coords_iter()
            .any(|c| env::contains_coord(&self.rect, &c))
        {
            return true;
        }
        let edges = self.rect.to_lines();
        let crosses_edge = Components::new(test)
            .segments()
            .any(|s| edges.iter().any(|e| line_intersection(s, *e).is_some()));
        if crosses_edge {
            return true;
        }
        // The rectangle may sit wholly inside an areal test.
        if is_areal(test) {
            let locator = SimplePointLocator::new(test);
            return self
                .rect
                .to_polygon()
                .exterior()
                .coords()
                .any(|c| locator.locate(c) != Location::Exterior);
        }
        false
    }

    /// Whether every point of `test` lies on the rectangle boundary.
    ///
    /// Assumes the test is covered by the rectangle. An areal component
    /// never lies in the boundary.
    fn is_contained_in_boundary(&self, test: &Geometry<T>) -> bool {
        let components = Components::new(test);
        if !components.polygons.is_empty() {
            return false;
        }
        components.points.iter().all(|p| self.is_point_on_boundary(&p.0))
            && components.lines.iter().all(|ls| {
                ls.0.iter().all(|c| self.is_point_on_boundary(c))
                    && ls.lines().all(|l| self.is_segment_on_boundary(l.start, l.end))
            })
    }

    fn is_point_on_boundary(&self, c: &Coord<T>) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        c.x == min.x || c.x == max.x || c.y == min.y || c.y == max.y
    }

    // Both end points are on the boundary; the segment is on it only if
    // it runs along one edge.
    fn is_segment_on_boundary(&self, p: Coord<T>, q: Coord<T>) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        if p == q {
            return self.is_point_on_boundary(&p);
        }
        if p.x == q.x {
            return p.x == min.x || p.x == max.x;
        }
        if p.y == q.y {
            return p.y == min.y || p.y == max.y;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use wkt::TryFromWkt;

    use super::*;

    fn geom(wkt: &str) -> Geometry<f64> {
        Geometry::try_from_wkt_str(wkt).unwrap()
    }

    fn poly(wkt: &str) -> Polygon<f64> {
        Polygon::try_from_wkt_str(wkt).unwrap()
    }

    fn square() -> Rectangle<f64> {
        Rectangle::new(Rect::new((0., 0.), (10., 10.)))
    }

    #[test]
    fn detects_rectangles() {
        assert!(is_rectangle(&poly("POLYGON((0 0,10 0,10 10,0 10,0 0))")));
        assert!(is_rectangle(&poly("POLYGON((0 0,0 10,10 10,10 0,0 0))")));
        assert!(is_rectangle(&Rect::new((1., 2.), (3., 5.)).to_polygon()));
        // Extra collinear vertex.
        assert!(!is_rectangle(&poly("POLYGON((0 0,5 0,10 0,10 10,0 10,0 0))")));
        // Five corners, but a diagonal edge.
        assert!(!is_rectangle(&poly("POLYGON((0 0,10 10,10 0,0 10,0 0))")));
        assert!(!is_rectangle(&poly("POLYGON((0 0,10 0,10 10,0 10,0 0),(2 2,3 2,3 3,2 2))")));
        assert!(!is_rectangle(&poly("POLYGON((0 0,10 0,5 10,0 0))")));
    }

    #[test]
    fn contains_and_covers() {
        let r = square();
        assert!(r.contains(&geom("POINT(5 5)")));
        assert!(!r.contains(&geom("POINT(0 5)")));
        assert!(r.covers(&geom("POINT(0 5)")));
        assert!(!r.contains(&geom("LINESTRING(0 0,10 0,10 10)")));
        assert!(r.covers(&geom("LINESTRING(0 0,10 0,10 10)")));
        assert!(r.contains(&geom("LINESTRING(0 0,10 10)")));
        assert!(r.contains(&geom("POLYGON((0 0,10 0,10 10,0 10,0 0))")));
        assert!(r.contains(&geom("GEOMETRYCOLLECTION(POINT(0 0),POINT(5 5))")));
        assert!(!r.covers(&geom("LINESTRING(5 5,11 5)")));
        assert!(!r.covers(&geo::Geometry::GeometryCollection(geo::GeometryCollection::<f64>(vec![]))));
    }

    #[test]
    fn intersects() {
        let r = square();
        assert!(r.intersects(&geom("POINT(10 10)")));
        assert!(!r.intersects(&geom("POINT(11 10)")));
        assert!(r.intersects(&geom("LINESTRING(-5 5,15 5)")));
        assert!(!r.intersects(&geom("LINESTRING(-5 11,15 11)")));
        // Envelopes overlap, geometries do not.
        assert!(!r.intersects(&geom("LINESTRING(-5 8,8 15)")));
        // Rectangle inside a larger polygon.
        assert!(r.intersects(&geom("POLYGON((-10 -10,20 -10,20 20,-10 20,-10 -10))")));
        // Rectangle inside the hole of a larger polygon.
        assert!(!r.intersects(&geom(
            "POLYGON((-10 -10,20 -10,20 20,-10 20,-10 -10),(-5 -5,15 -5,15 15,-5 15,-5 -5))"
        )));
    }
}
