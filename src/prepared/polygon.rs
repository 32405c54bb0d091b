use std::sync::OnceLock;

use geo::{GeoFloat, Geometry, Rect};
use log::debug;

use super::{
    check_finite, check_test,
    contains::{self, Containment},
    rectangle::{is_rectangle, Rectangle},
};
use crate::{
    components::{envelope, is_puntal, is_areal, segments, variant_name},
    crossings::SegmentIntersectionFinder,
    envelope as env,
    error::{PreparedError, Result},
    locate::IndexedPointInAreaLocator,
};

/// A polygonal geometry prepared for repeated predicate evaluation.
///
/// Construction only stores the geometry and computes its envelope. The
/// point locator and segment index are built on first use and reused
/// by every later query; both are immutable once built, so a prepared
/// polygon can be shared between threads.
///
/// ```rust
/// use geo::{polygon, Geometry, Point};
/// use geo_prepared::PreparedPolygon;
///
/// let square = polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)];
/// let prepared = PreparedPolygon::new(square).unwrap();
///
/// let inside: Geometry<f64> = Point::new(5., 5.).into();
/// let corner: Geometry<f64> = Point::new(0., 0.).into();
/// assert!(prepared.contains(&inside).unwrap());
/// assert!(!prepared.contains(&corner).unwrap());
/// assert!(prepared.covers(&corner).unwrap());
/// ```
pub struct PreparedPolygon<T: GeoFloat> {
    geom: Geometry<T>,
    envelope: Option<Rect<T>>,
    rectangle: Option<Rectangle<T>>,
    point_locator: OnceLock<IndexedPointInAreaLocator<T>>,
    intersection_finder: OnceLock<SegmentIntersectionFinder<T>>,
}

impl<T: GeoFloat> std::fmt::Debug for PreparedPolygon<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedPolygon")
            .field("geom", &self.geom)
            .field("is_rectangle", &self.is_rectangle())
            .finish()
    }
}

impl<T: GeoFloat> PreparedPolygon<T> {
    /// Prepare a `Polygon`, `MultiPolygon`, `Rect` or `Triangle`.
    ///
    /// `Rect` and `Triangle` are stored as the equivalent `Polygon`.
    pub fn new<G: Into<Geometry<T>>>(geom: G) -> Result<Self> {
        let geom = match geom.into() {
            Geometry::Rect(r) => Geometry::Polygon(r.to_polygon()),
            Geometry::Triangle(t) => Geometry::Polygon(t.to_polygon()),
            g @ (Geometry::Polygon(_) | Geometry::MultiPolygon(_)) => g,
            other => {
                return Err(PreparedError::UnexpectedGeometry {
                    expected: "polygonal",
                    found: variant_name(&other),
                })
            }
        };
        check_finite(&geom)?;

        let rectangle = match &geom {
            Geometry::Polygon(poly) if is_rectangle(poly) => envelope(&geom).map(Rectangle::new),
            _ => None,
        };
        Ok(PreparedPolygon {
            envelope: envelope(&geom),
            rectangle,
            geom,
            point_locator: OnceLock::new(),
            intersection_finder: OnceLock::new(),
        })
    }

    pub fn geometry(&self) -> &Geometry<T> {
        &self.geom
    }

    /// Envelope of the target; `None` if it is empty.
    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
    }

    /// Whether the target is an axis-aligned rectangle, in which case
    /// predicates skip the indices entirely.
    pub fn is_rectangle(&self) -> bool {
        self.rectangle.is_some()
    }

    /// Point locator over the target rings, built on first use.
    pub fn point_locator(&self) -> &IndexedPointInAreaLocator<T> {
        self.point_locator
            .get_or_init(|| IndexedPointInAreaLocator::new(&self.geom))
    }

    /// Segment index over the target rings, built on first use.
    pub fn intersection_finder(&self) -> &SegmentIntersectionFinder<T> {
        self.intersection_finder
            .get_or_init(|| SegmentIntersectionFinder::new(segments(&self.geom)))
    }

    fn envelope_covers(&self, test: &Geometry<T>) -> bool {
        match (&self.envelope, envelope(test)) {
            (Some(target), Some(test)) => env::covers(target, &test),
            _ => false,
        }
    }

    fn envelope_intersects(&self, test: &Geometry<T>) -> bool {
        match (&self.envelope, envelope(test)) {
            (Some(target), Some(test)) => env::intersects(target, &test),
            _ => false,
        }
    }

    /// Whether `test` lies in the target and some point of `test` lies
    /// in the target interior.
    ///
    /// A test lying wholly on the target boundary is covered but not
    /// contained.
    pub fn contains(&self, test: &Geometry<T>) -> Result<bool> {
        check_test(test, "contains")?;
        if !self.envelope_covers(test) {
            return Ok(false);
        }
        if let Some(rect) = &self.rectangle {
            return Ok(rect.contains(test));
        }
        Ok(contains::eval(
            &self.geom,
            self.point_locator(),
            self.intersection_finder(),
            test,
            Containment::Contains,
        ))
    }

    /// Whether no point of `test` lies in the target exterior.
    pub fn covers(&self, test: &Geometry<T>) -> Result<bool> {
        check_test(test, "covers")?;
        if !self.envelope_covers(test) {
            return Ok(false);
        }
        if self.rectangle.is_some() {
            return Ok(true);
        }
        Ok(contains::eval(
            &self.geom,
            self.point_locator(),
            self.intersection_finder(),
            test,
            Containment::Covers,
        ))
    }

    /// Whether `test` lies in the target interior, not touching the
    /// target boundary.
    pub fn contains_properly(&self, test: &Geometry<T>) -> Result<bool> {
        check_test(test, "contains_properly")?;
        if !self.envelope_covers(test) {
            return Ok(false);
        }
        Ok(contains::contains_properly(
            &self.geom,
            self.point_locator(),
            self.intersection_finder(),
            test,
        ))
    }

    /// Whether the target and `test` share at least one point.
    pub fn intersects(&self, test: &Geometry<T>) -> Result<bool> {
        check_finite(test)?;
        if !self.envelope_intersects(test) {
            return Ok(false);
        }
        if let Some(rect) = &self.rectangle {
            return Ok(rect.intersects(test));
        }
        if contains::any_in_target(self.point_locator(), test) {
            debug!("intersects: test vertex in target");
            return Ok(true);
        }
        if is_puntal(test) {
            return Ok(false);
        }
        if self.intersection_finder().intersects(segments(test)) {
            debug!("intersects: segments intersect");
            return Ok(true);
        }
        Ok(is_areal(test) && contains::any_target_in_test_area(&self.geom, test))
    }

    pub fn disjoint(&self, test: &Geometry<T>) -> Result<bool> {
        self.intersects(test).map(|b| !b)
    }
}
