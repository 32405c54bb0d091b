//! Shared containment logic for polygonal targets.
//!
//! [`eval`] decides `contains` and `covers` of an arbitrary test
//! geometry by a polygonal target, using the target's point locator and
//! segment intersection finder. Most inputs are decided by locating
//! test vertices and classifying segment intersections. Only when the
//! test boundary touches the target boundary without crossing it does
//! the evaluation fall back to the full DE-9IM relate.
//!
//! [`contains_properly`] needs no fallback: any intersection between
//! the boundaries rules it out.
use geo::{CoordsIter, GeoFloat, Geometry, Relate};
use log::debug;

use crate::{
    components::{is_polygonal, is_puntal, segments, Components},
    crossings::SegmentIntersectionFinder,
    locate::{Location, PointLocator, SimplePointLocator},
};

/// Flavour of containment to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Test must lie in the target and meet its interior.
    Contains,
    /// Test must lie in the target; may lie entirely on its boundary.
    Covers,
}

impl Containment {
    #[inline]
    fn requires_interior_point(self) -> bool {
        matches!(self, Containment::Contains)
    }
}

/// Evaluate `target contains test` or `target covers test`.
///
/// The caller is expected to have rejected inputs whose envelopes
/// rule out containment, and test collections with polygonal members.
pub(crate) fn eval<T, L>(
    target: &Geometry<T>,
    locator: &L,
    finder: &SegmentIntersectionFinder<T>,
    test: &Geometry<T>,
    mode: Containment,
) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    if !all_in_target(locator, test) {
        debug!("{mode:?}: a test vertex is exterior");
        return false;
    }

    // Points lying in the closure of the target are covered; contained
    // only if one of them reaches the interior.
    if is_puntal(test) {
        return !mode.requires_interior_point() || any_in_target_interior(locator, test);
    }

    // A proper crossing puts part of the test in the target exterior if
    // the test is an area, or if the target has a single shell and no
    // holes. Otherwise the crossing may be at a shared hole or between
    // two touching shells.
    let proper_implies_not_contained = is_polygonal(test) || is_single_shell(target);

    let summary = finder.classify(segments(test));

    if proper_implies_not_contained && summary.has_proper {
        debug!("{mode:?}: proper intersection");
        return false;
    }
    // Only proper intersections, which always put some of the test
    // outside.
    if summary.has_intersection && !summary.has_non_proper {
        debug!("{mode:?}: only proper intersections");
        return false;
    }
    if summary.has_intersection {
        debug!("{mode:?}: boundaries touch; falling back to relate");
        let matrix = target.relate(test);
        return match mode {
            Containment::Contains => matrix.is_contains(),
            Containment::Covers => matrix.is_covers(),
        };
    }

    // No boundary contact: the test either lies in the target or wraps
    // around some of it.
    if is_polygonal(test) && any_target_in_test_area(target, test) {
        debug!("{mode:?}: target ring inside the test area");
        return false;
    }
    true
}

/// Evaluate `target contains-properly test`: the test lies in the
/// target interior and does not touch its boundary.
pub(crate) fn contains_properly<T, L>(
    target: &Geometry<T>,
    locator: &L,
    finder: &SegmentIntersectionFinder<T>,
    test: &Geometry<T>,
) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    if !all_in_target_interior(locator, test) {
        return false;
    }
    if finder.intersects(segments(test)) {
        return false;
    }
    // A polygonal test may still enclose the target (or one of its
    // holes) without touching it.
    !(is_polygonal(test) && any_target_in_test_area(target, test))
}

/// Whether no test vertex lies in the target exterior.
pub(crate) fn all_in_target<T, L>(locator: &L, test: &Geometry<T>) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    test.coords_iter()
        .all(|c| locator.locate(&c) != Location::Exterior)
}

/// Whether every test vertex lies in the target interior.
pub(crate) fn all_in_target_interior<T, L>(locator: &L, test: &Geometry<T>) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    test.coords_iter()
        .all(|c| locator.locate(&c) == Location::Interior)
}

/// Whether some test vertex lies in the target closure.
pub(crate) fn any_in_target<T, L>(locator: &L, test: &Geometry<T>) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    test.coords_iter()
        .any(|c| locator.locate(&c) != Location::Exterior)
}

/// Whether some test vertex lies in the target interior.
pub(crate) fn any_in_target_interior<T, L>(locator: &L, test: &Geometry<T>) -> bool
where
    T: GeoFloat,
    L: PointLocator<T>,
{
    test.coords_iter()
        .any(|c| locator.locate(&c) == Location::Interior)
}

/// Whether a vertex of some target component lies in the closure of
/// the test area.
///
/// One vertex per component suffices: callers only ask once they know
/// the boundaries do not intersect, so each target ring, line and point
/// lies wholly inside or wholly outside the test.
pub(crate) fn any_target_in_test_area<T: GeoFloat>(
    target: &Geometry<T>,
    test: &Geometry<T>,
) -> bool {
    let locator = SimplePointLocator::new(test);
    Components::new(target)
        .connected_element_coords()
        .any(|c| locator.locate(&c) != Location::Exterior)
}

fn is_single_shell<T: GeoFloat>(geom: &Geometry<T>) -> bool {
    match geom {
        Geometry::Polygon(poly) => poly.interiors().is_empty(),
        Geometry::MultiPolygon(mp) => mp.0.len() == 1 && mp.0[0].interiors().is_empty(),
        Geometry::Rect(_) | Geometry::Triangle(_) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use wkt::TryFromWkt;

    use super::*;
    use crate::{crossings::tests::init_log, locate::IndexedPointInAreaLocator};

    fn geom(wkt: &str) -> Geometry<f64> {
        Geometry::try_from_wkt_str(wkt).unwrap()
    }

    fn check(target: &str, test: &str, mode: Containment) -> bool {
        init_log();
        let target = geom(target);
        let test = geom(test);
        let locator = IndexedPointInAreaLocator::new(&target);
        let finder = SegmentIntersectionFinder::new(segments(&target));
        eval(&target, &locator, &finder, &test, mode)
    }

    const SQUARE: &str = "POLYGON((0 0,10 0,10 10,0 10,0 0))";
    const WITH_HOLE: &str = "POLYGON((0 0,10 0,10 10,0 10,0 0),(4 4,6 4,6 6,4 6,4 4))";

    #[test]
    fn points() {
        use Containment::*;
        assert!(check(SQUARE, "POINT(5 5)", Contains));
        assert!(!check(SQUARE, "POINT(0 0)", Contains));
        assert!(check(SQUARE, "POINT(0 0)", Covers));
        assert!(check(SQUARE, "MULTIPOINT((0 0),(5 5))", Contains));
        assert!(!check(SQUARE, "MULTIPOINT((0 0),(15 5))", Covers));
        assert!(!check(WITH_HOLE, "POINT(5 5)", Covers));
    }

    #[test]
    fn lines() {
        use Containment::*;
        assert!(check(SQUARE, "LINESTRING(1 1,9 9)", Contains));
        // Vertices on the boundary, body through the interior.
        assert!(check(SQUARE, "LINESTRING(0 0,10 10)", Contains));
        // Along an edge.
        assert!(!check(SQUARE, "LINESTRING(0 0,10 0)", Contains));
        assert!(check(SQUARE, "LINESTRING(0 0,10 0)", Covers));
        // Crosses the hole.
        assert!(!check(WITH_HOLE, "LINESTRING(1 5,9 5)", Covers));
        // Crosses out and back in.
        assert!(!check(SQUARE, "LINESTRING(5 5,15 5,15 6,5 6)", Covers));
        assert!(!check(SQUARE, "LINESTRING(5 5,5 -5)", Contains));
    }

    #[test]
    fn polygons() {
        use Containment::*;
        assert!(check(SQUARE, "POLYGON((1 1,9 1,9 9,1 9,1 1))", Contains));
        assert!(check(SQUARE, SQUARE, Contains));
        assert!(check(SQUARE, "POLYGON((0 0,5 0,5 5,0 5,0 0))", Contains));
        // Wraps the hole.
        assert!(!check(WITH_HOLE, "POLYGON((3 3,7 3,7 7,3 7,3 3))", Covers));
        // Sits in the hole, touching its ring.
        assert!(!check(WITH_HOLE, "POLYGON((4 4,6 4,6 6,4 6,4 4))", Covers));
        // Shares the hole as its own hole.
        assert!(check(
            WITH_HOLE,
            "POLYGON((1 1,9 1,9 9,1 9,1 1),(4 4,6 4,6 6,4 6,4 4))",
            Contains
        ));
        assert!(!check(SQUARE, "POLYGON((5 5,15 5,15 15,5 15,5 5))", Covers));
    }

    #[test]
    fn shells_touching_at_a_corner() {
        use Containment::*;
        let target = "MULTIPOLYGON(((0 0,5 0,5 5,0 5,0 0)),((5 5,10 5,10 10,5 10,5 5)))";
        // Passes from one shell to the other through the shared corner.
        assert!(check(target, "LINESTRING(1 1,9 9)", Contains));
        assert!(check(target, "LINESTRING(1 4,9 6)", Covers));
        assert!(!check(target, "LINESTRING(1 1,9 1)", Covers));
    }

    #[test]
    fn properly() {
        init_log();
        let target = geom(WITH_HOLE);
        let locator = IndexedPointInAreaLocator::new(&target);
        let finder = SegmentIntersectionFinder::new(segments(&target));
        let run = |wkt: &str| contains_properly(&target, &locator, &finder, &geom(wkt));

        assert!(run("POINT(1 1)"));
        assert!(!run("POINT(0 5)"));
        assert!(run("LINESTRING(1 1,3 1,3 3)"));
        assert!(run("LINESTRING(1 1,9 1,9 9)"));
        assert!(!run("LINESTRING(1 5,9 5)"));
        assert!(!run("POLYGON((0 0,5 0,5 5,0 5,0 0))"));
        assert!(run("POLYGON((1 1,3 1,3 3,1 3,1 1))"));
        assert!(!run("POLYGON((3 3,7 3,7 7,3 7,3 3))"));
    }
}
