use geo::{GeoFloat, Geometry, Rect};

use super::check_finite;
use crate::{
    components::{envelope, variant_name, Components},
    envelope as env,
    error::{PreparedError, Result},
    locate::{Location, PointLocator, SimplePointLocator},
};

/// A puntal geometry prepared for repeated `intersects` queries.
///
/// Points need no index; preparing only caches the envelope.
#[derive(Debug, Clone)]
pub struct PreparedPoint<T: GeoFloat> {
    geom: Geometry<T>,
    envelope: Option<Rect<T>>,
}

impl<T: GeoFloat> PreparedPoint<T> {
    /// Prepare a `Point` or `MultiPoint`.
    pub fn new<G: Into<Geometry<T>>>(geom: G) -> Result<Self> {
        let geom = geom.into();
        if !matches!(geom, Geometry::Point(_) | Geometry::MultiPoint(_)) {
            return Err(PreparedError::UnexpectedGeometry {
                expected: "puntal",
                found: variant_name(&geom),
            });
        }
        check_finite(&geom)?;
        Ok(PreparedPoint {
            envelope: envelope(&geom),
            geom,
        })
    }

    pub fn geometry(&self) -> &Geometry<T> {
        &self.geom
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
    }

    /// Whether some target point lies in the closure of `test`.
    pub fn intersects(&self, test: &Geometry<T>) -> Result<bool> {
        check_finite(test)?;
        match (&self.envelope, envelope(test)) {
            (Some(target), Some(test)) if env::intersects(target, &test) => {}
            _ => return Ok(false),
        }
        let locator = SimplePointLocator::new(test);
        Ok(Components::new(&self.geom)
            .points
            .iter()
            .any(|p| locator.locate(&p.0) != Location::Exterior))
    }

    pub fn disjoint(&self, test: &Geometry<T>) -> Result<bool> {
        self.intersects(test).map(|b| !b)
    }
}

#[cfg(test)]
mod tests {
    use wkt::TryFromWkt;

    use super::*;

    fn geom(wkt: &str) -> Geometry<f64> {
        Geometry::try_from_wkt_str(wkt).unwrap()
    }

    #[test]
    fn intersects() {
        let target = PreparedPoint::new(geom("MULTIPOINT((0 0),(5 5))")).unwrap();
        let run = |wkt: &str| target.intersects(&geom(wkt)).unwrap();
        assert!(run("POINT(5 5)"));
        assert!(!run("POINT(5 6)"));
        assert!(run("LINESTRING(0 5,10 5)"));
        assert!(run("LINESTRING(-1 0,1 0)"));
        assert!(!run("LINESTRING(1 0,4 0)"));
        assert!(run("POLYGON((4 4,6 4,6 6,4 6,4 4))"));
        assert!(!run("POLYGON((1 1,4 1,4 4,1 4,1 1))"));
        assert!(target.disjoint(&geom("POINT(1 1)")).unwrap());
    }

    #[test]
    fn point_shared_by_members() {
        let corner = PreparedPoint::new(geom("POINT(5 5)")).unwrap();
        let shells = geom("MULTIPOLYGON(((0 0,5 0,5 5,0 5,0 0)),((5 5,10 5,10 10,5 10,5 5)))");
        assert!(corner.intersects(&shells).unwrap());

        let joint = PreparedPoint::new(geom("POINT(5 0)")).unwrap();
        assert!(joint
            .intersects(&geom("MULTILINESTRING((0 0,5 0),(5 0,10 0))"))
            .unwrap());
        assert!(joint.intersects(&geom("LINESTRING(5 0,5 0)")).unwrap());
    }

    #[test]
    fn rejects_non_puntal() {
        assert!(matches!(
            PreparedPoint::new(geom("LINESTRING(0 0,1 1)")),
            Err(PreparedError::UnexpectedGeometry { expected: "puntal", .. })
        ));
    }
}
