//! Prepared geometries: targets wrapped with lazily built indices for
//! evaluating many predicates against the same geometry.
//!
//! Polygonal targets get the full set of fast predicates (see
//! [`PreparedPolygon`]). Linear and puntal targets only accelerate
//! `intersects`; their containment predicates use the DE-9IM relate.
mod contains;
pub use contains::Containment;

mod rectangle;
pub use rectangle::is_rectangle;

mod polygon;
pub use polygon::PreparedPolygon;

mod line_string;
pub use line_string::PreparedLineString;

mod point;
pub use point::PreparedPoint;

use geo::{algorithm::relate::IntersectionMatrix, GeoFloat, Geometry, Rect, Relate};
use log::debug;

use crate::{
    components::{envelope, has_polygonal_member, is_finite},
    envelope as env,
    error::{PreparedError, Result},
};

pub(crate) fn check_finite<T: GeoFloat>(geom: &Geometry<T>) -> Result<()> {
    if is_finite(geom) {
        Ok(())
    } else {
        Err(PreparedError::NonFiniteCoordinate)
    }
}

/// Validate the test geometry of a containment predicate.
pub(crate) fn check_test<T: GeoFloat>(test: &Geometry<T>, predicate: &'static str) -> Result<()> {
    check_finite(test)?;
    if has_polygonal_member(test) {
        return Err(PreparedError::UnsupportedCollection { predicate });
    }
    Ok(())
}

/// A prepared target of any geometry type.
///
/// Built by [`prepare`], which picks the facade matching the target.
/// Geometry collections, which no facade accelerates, are evaluated
/// with the DE-9IM relate on every call.
#[derive(Debug)]
pub enum PreparedGeometry<T: GeoFloat> {
    Polygon(PreparedPolygon<T>),
    LineString(PreparedLineString<T>),
    Point(PreparedPoint<T>),
    Collection(Geometry<T>),
}

/// Prepare a geometry for repeated predicate evaluation.
///
/// Fails only if the geometry has a non-finite coordinate.
pub fn prepare<T: GeoFloat, G: Into<Geometry<T>>>(geom: G) -> Result<PreparedGeometry<T>> {
    let geom = geom.into();
    let prepared = match geom {
        Geometry::Polygon(_)
        | Geometry::MultiPolygon(_)
        | Geometry::Rect(_)
        | Geometry::Triangle(_) => PreparedGeometry::Polygon(PreparedPolygon::new(geom)?),
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
            PreparedGeometry::LineString(PreparedLineString::new(geom)?)
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            PreparedGeometry::Point(PreparedPoint::new(geom)?)
        }
        Geometry::GeometryCollection(_) => {
            check_finite(&geom)?;
            PreparedGeometry::Collection(geom)
        }
    };
    Ok(prepared)
}

// Relate pattern for "contains properly": interiors meet, and the test
// has no point in the target boundary or exterior.
const CONTAINS_PROPERLY: &str = "T**FF*FF*";

impl<T: GeoFloat> PreparedGeometry<T> {
    pub fn geometry(&self) -> &Geometry<T> {
        match self {
            PreparedGeometry::Polygon(p) => p.geometry(),
            PreparedGeometry::LineString(p) => p.geometry(),
            PreparedGeometry::Point(p) => p.geometry(),
            PreparedGeometry::Collection(g) => g,
        }
    }

    fn envelope(&self) -> Option<Rect<T>> {
        match self {
            PreparedGeometry::Polygon(p) => p.envelope(),
            PreparedGeometry::LineString(p) => p.envelope(),
            PreparedGeometry::Point(p) => p.envelope(),
            PreparedGeometry::Collection(g) => envelope(g),
        }
    }

    /// Relate fallback for targets without a dedicated containment
    /// algorithm.
    fn relate_covering(
        &self,
        test: &Geometry<T>,
        pred: impl Fn(&IntersectionMatrix) -> bool,
    ) -> Result<bool> {
        check_finite(test)?;
        match (self.envelope(), envelope(test)) {
            (Some(target), Some(test)) if env::covers(&target, &test) => {}
            _ => return Ok(false),
        }
        debug!("evaluating containment through relate");
        Ok(pred(&self.geometry().relate(test)))
    }

    pub fn contains(&self, test: &Geometry<T>) -> Result<bool> {
        match self {
            PreparedGeometry::Polygon(p) => p.contains(test),
            _ => self.relate_covering(test, |m| m.is_contains()),
        }
    }

    pub fn covers(&self, test: &Geometry<T>) -> Result<bool> {
        match self {
            PreparedGeometry::Polygon(p) => p.covers(test),
            _ => self.relate_covering(test, |m| m.is_covers()),
        }
    }

    pub fn contains_properly(&self, test: &Geometry<T>) -> Result<bool> {
        match self {
            PreparedGeometry::Polygon(p) => p.contains_properly(test),
            _ => self.relate_covering(test, |m| m.matches(CONTAINS_PROPERLY).unwrap_or(false)),
        }
    }

    pub fn intersects(&self, test: &Geometry<T>) -> Result<bool> {
        match self {
            PreparedGeometry::Polygon(p) => p.intersects(test),
            PreparedGeometry::LineString(p) => p.intersects(test),
            PreparedGeometry::Point(p) => p.intersects(test),
            PreparedGeometry::Collection(g) => {
                check_finite(test)?;
                match (envelope(g), envelope(test)) {
                    (Some(target), Some(test)) if env::intersects(&target, &test) => {}
                    _ => return Ok(false),
                }
                Ok(g.relate(test).is_intersects())
            }
        }
    }

    pub fn disjoint(&self, test: &Geometry<T>) -> Result<bool> {
        self.intersects(test).map(|b| !b)
    }
}
