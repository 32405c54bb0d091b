//! Decomposition of geometries into points, lines and polygons.
//!
//! Every site that needs to look inside a [`Geometry`] goes through
//! [`Components`], which matches exhaustively on the geometry variants
//! once. `Line`, `Rect` and `Triangle` are converted to their
//! line-string and polygon equivalents.
use std::borrow::Cow;

use geo::{
    dimensions::{Dimensions, HasDimensions},
    BoundingRect, Coord, CoordNum, CoordsIter, GeoFloat, GeoNum, Geometry, Line, LineString, Point,
    Polygon, Rect,
};

/// The point, line and polygon components of a geometry, in traversal
/// order.
///
/// `lines` holds every linear component, including the rings of the
/// polygons in `polygons`.
#[derive(Debug, Clone)]
pub struct Components<'a, T: CoordNum> {
    pub points: Vec<Point<T>>,
    pub lines: Vec<Cow<'a, LineString<T>>>,
    pub polygons: Vec<Cow<'a, Polygon<T>>>,
}

impl<'a, T: CoordNum> Default for Components<'a, T> {
    fn default() -> Self {
        Components {
            points: vec![],
            lines: vec![],
            polygons: vec![],
        }
    }
}

impl<'a, T: CoordNum> Components<'a, T> {
    pub fn new(geom: &'a Geometry<T>) -> Self {
        let mut components = Components::default();
        components.visit(geom);
        components
    }

    fn visit(&mut self, geom: &'a Geometry<T>) {
        match geom {
            Geometry::Point(p) => self.points.push(*p),
            Geometry::MultiPoint(mp) => self.points.extend(mp.iter().copied()),
            Geometry::Line(l) => self
                .lines
                .push(Cow::Owned(LineString::new(vec![l.start, l.end]))),
            Geometry::LineString(ls) => self.lines.push(Cow::Borrowed(ls)),
            Geometry::MultiLineString(mls) => self.lines.extend(mls.iter().map(Cow::Borrowed)),
            Geometry::Polygon(poly) => self.add_polygon(Cow::Borrowed(poly)),
            Geometry::MultiPolygon(mp) => {
                for poly in mp.iter() {
                    self.add_polygon(Cow::Borrowed(poly));
                }
            }
            Geometry::Rect(r) => self.add_polygon(Cow::Owned(r.to_polygon())),
            Geometry::Triangle(t) => self.add_polygon(Cow::Owned(t.to_polygon())),
            Geometry::GeometryCollection(gc) => {
                for g in gc.iter() {
                    self.visit(g);
                }
            }
        }
    }

    fn add_polygon(&mut self, poly: Cow<'a, Polygon<T>>) {
        if poly.exterior().0.is_empty() {
            return;
        }
        match &poly {
            Cow::Borrowed(p) => {
                self.lines.push(Cow::Borrowed(p.exterior()));
                self.lines.extend(p.interiors().iter().map(Cow::Borrowed));
            }
            Cow::Owned(p) => {
                self.lines.push(Cow::Owned(p.exterior().clone()));
                self.lines
                    .extend(p.interiors().iter().map(|r| Cow::Owned(r.clone())));
            }
        }
        self.polygons.push(poly);
    }

    /// Whether there is no vertex at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.iter().all(|ls| ls.0.is_empty())
    }

    /// Iterate over every segment of the linear components.
    pub fn segments(&self) -> impl Iterator<Item = Line<T>> + '_ {
        self.lines.iter().flat_map(|ls| ls.lines())
    }

    /// One coordinate for each connected element: each point, and the
    /// first vertex of each line and ring.
    pub fn connected_element_coords(&self) -> impl Iterator<Item = Coord<T>> + '_ {
        self.points
            .iter()
            .map(|p| p.0)
            .chain(self.lines.iter().filter_map(|ls| ls.0.first().copied()))
    }
}

/// Iterate over every segment of a geometry (the rings of areal
/// components included). Points contribute nothing.
pub fn segments<T: CoordNum>(geom: &Geometry<T>) -> Vec<Line<T>> {
    Components::new(geom).segments().collect()
}

/// Whether a line string has no segment of positive length, so it
/// occupies at most a single point.
pub fn is_degenerate<T: CoordNum>(ls: &LineString<T>) -> bool {
    ls.lines().all(|l| l.start == l.end)
}

/// Whether the geometry is a polygon or multi-polygon (including the
/// `Rect` and `Triangle` shorthands).
pub fn is_polygonal<T: CoordNum>(geom: &Geometry<T>) -> bool {
    matches!(
        geom,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_)
    )
}

/// Whether a collection (at any nesting depth) has a polygonal member.
pub fn has_polygonal_member<T: CoordNum>(geom: &Geometry<T>) -> bool {
    match geom {
        Geometry::GeometryCollection(gc) => gc
            .iter()
            .any(|g| is_polygonal(g) || has_polygonal_member(g)),
        _ => false,
    }
}

/// Whether the geometry is made only of points.
pub fn is_puntal<T: GeoNum>(geom: &Geometry<T>) -> bool {
    geom.dimensions() == Dimensions::ZeroDimensional
}

/// Whether the geometry has two-dimensional parts.
pub fn is_areal<T: GeoNum>(geom: &Geometry<T>) -> bool {
    geom.dimensions() == Dimensions::TwoDimensional
}

/// Whether every ordinate of the geometry is finite.
pub fn is_finite<T: GeoFloat>(geom: &Geometry<T>) -> bool {
    geom.coords_iter().all(|c| c.x.is_finite() && c.y.is_finite())
}

/// Bounding box, or `None` for empty geometries.
pub fn envelope<T: CoordNum>(geom: &Geometry<T>) -> Option<Rect<T>> {
    geom.bounding_rect()
}

/// Variant name of a geometry, for error messages.
pub fn variant_name<T: CoordNum>(geom: &Geometry<T>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use geo::{GeometryCollection, MultiPoint};
    use wkt::TryFromWkt;

    use super::*;

    fn geom(wkt: &str) -> Geometry<f64> {
        Geometry::try_from_wkt_str(wkt).unwrap()
    }

    #[test]
    fn polygon_rings_are_lines() {
        let g = geom("POLYGON((0 0,10 0,10 10,0 10,0 0),(2 2,4 2,4 4,2 2))");
        let components = Components::new(&g);
        assert_eq!(components.polygons.len(), 1);
        assert_eq!(components.lines.len(), 2);
        assert!(components.points.is_empty());
        assert_eq!(components.segments().count(), 7);
        assert_eq!(components.connected_element_coords().count(), 2);
    }

    #[test]
    fn collections_are_flattened() {
        let g = geom(
            "GEOMETRYCOLLECTION(POINT(1 1),MULTIPOINT((2 2),(3 3)),LINESTRING(0 0,1 0,2 0),\
             GEOMETRYCOLLECTION(POLYGON((0 0,1 0,1 1,0 0))))",
        );
        let components = Components::new(&g);
        assert_eq!(components.points.len(), 3);
        assert_eq!(components.lines.len(), 2);
        assert_eq!(components.polygons.len(), 1);
        assert!(has_polygonal_member(&g));
        assert!(!is_polygonal(&g));
        assert!(is_areal(&g));
    }

    #[test]
    fn shorthand_variants() {
        let rect: Geometry<f64> = Rect::new((0., 0.), (2., 1.)).into();
        let components = Components::new(&rect);
        assert_eq!(components.polygons.len(), 1);
        assert_eq!(components.segments().count(), 4);
        assert!(is_polygonal(&rect));

        let line: Geometry<f64> = Line::from([(0., 0.), (2., 1.)]).into();
        assert_eq!(segments(&line).len(), 1);
    }

    #[test]
    fn degenerate_lines() {
        assert!(is_degenerate(&LineString::from(vec![(10., 4.), (10., 4.)])));
        assert!(is_degenerate(&LineString::from(vec![(1., 1.)])));
        assert!(!is_degenerate(&LineString::from(vec![(1., 1.), (1., 1.), (2., 1.)])));
    }

    #[test]
    fn dimensions() {
        let pts: Geometry<f64> = MultiPoint::from(vec![(0., 0.), (1., 1.)]).into();
        assert!(is_puntal(&pts));
        assert!(!is_areal(&pts));
        let empty: Geometry<f64> = Geometry::GeometryCollection(GeometryCollection::<f64>(vec![]));
        assert!(!is_puntal(&empty));
        assert!(envelope(&empty).is_none());
        assert!(is_finite(&pts));
        let bad: Geometry<f64> = Point::new(f64::NAN, 0.).into();
        assert!(!is_finite(&bad));
    }
}
