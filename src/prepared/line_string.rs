use std::sync::OnceLock;

use geo::{GeoFloat, Geometry, Rect};
use log::debug;

use super::check_finite;
use crate::{
    components::{envelope, is_degenerate, segments, variant_name, Components},
    crossings::SegmentIntersectionFinder,
    envelope as env,
    error::{PreparedError, Result},
    locate::{Location, PointLocator, SimplePointLocator},
};

/// A linear geometry prepared for repeated `intersects` queries.
///
/// Holds a lazily built index over the target segments.
pub struct PreparedLineString<T: GeoFloat> {
    geom: Geometry<T>,
    envelope: Option<Rect<T>>,
    intersection_finder: OnceLock<SegmentIntersectionFinder<T>>,
}

impl<T: GeoFloat> std::fmt::Debug for PreparedLineString<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedLineString")
            .field("geom", &self.geom)
            .finish()
    }
}

impl<T: GeoFloat> PreparedLineString<T> {
    /// Prepare a `Line`, `LineString` or `MultiLineString`.
    pub fn new<G: Into<Geometry<T>>>(geom: G) -> Result<Self> {
        let geom = geom.into();
        if !matches!(
            geom,
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_)
        ) {
            return Err(PreparedError::UnexpectedGeometry {
                expected: "linear",
                found: variant_name(&geom),
            });
        }
        check_finite(&geom)?;
        Ok(PreparedLineString {
            envelope: envelope(&geom),
            geom,
            intersection_finder: OnceLock::new(),
        })
    }

    pub fn geometry(&self) -> &Geometry<T> {
        &self.geom
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
    }

    pub fn intersection_finder(&self) -> &SegmentIntersectionFinder<T> {
        self.intersection_finder
            .get_or_init(|| SegmentIntersectionFinder::new(segments(&self.geom)))
    }

    /// Whether the target and `test` share at least one point.
    pub fn intersects(&self, test: &Geometry<T>) -> Result<bool> {
        check_finite(test)?;
        match (&self.envelope, envelope(test)) {
            (Some(target), Some(test)) if env::intersects(target, &test) => {}
            _ => return Ok(false),
        }

        if self.intersection_finder().intersects(segments(test)) {
            debug!("intersects: segments intersect");
            return Ok(true);
        }

        // Lines of a single point have no indexed segment, so they are
        // located as points. The whole target may also lie inside an
        // areal part of the test.
        let components = Components::new(test);
        let test_is_areal = !components.polygons.is_empty();
        let test_locator = SimplePointLocator::new(test);
        let target_in_test = Components::new(&self.geom)
            .lines
            .iter()
            .filter(|ls| test_is_areal || is_degenerate(ls))
            .filter_map(|ls| ls.0.first())
            .any(|c| test_locator.locate(c) != Location::Exterior);
        if target_in_test {
            debug!("intersects: target vertex in test");
            return Ok(true);
        }

        let locator = SimplePointLocator::new(&self.geom);
        let test_points = components.points.iter().map(|p| p.0).chain(
            components
                .lines
                .iter()
                .filter(|ls| is_degenerate(ls))
                .filter_map(|ls| ls.0.first().copied()),
        );
        for c in test_points {
            if locator.locate(&c) != Location::Exterior {
                debug!("intersects: test point on target");
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn disjoint(&self, test: &Geometry<T>) -> Result<bool> {
        self.intersects(test).map(|b| !b)
    }
}
