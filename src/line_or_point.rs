use geo::{
    kernels::{Kernel, Orientation},
    line_intersection::{line_intersection, LineIntersection},
    Coord, GeoFloat, GeoNum, Line,
};

use crate::sweep_point::SweepPoint;

/// Either a line segment or a point.
///
/// The coordinates are ordered (see [`SweepPoint`]) and a line
/// segment must have distinct points (use the `Point` variant if the
/// coordinates are the equal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOrPoint<T: GeoNum> {
    Point(SweepPoint<T>),
    Line(SweepPoint<T>, SweepPoint<T>),
}

/// Convert from a [`Line`] ensuring end point ordering.
impl<T: GeoNum> From<Line<T>> for LineOrPoint<T> {
    fn from(l: Line<T>) -> Self {
        let start = l.start.into();
        let end = l.end.into();
        if start < end {
            LineOrPoint::Line(start, end)
        } else if start > end {
            LineOrPoint::Line(end, start)
        } else {
            LineOrPoint::Point(start)
        }
    }
}

/// Convert from a [`Coord`]
impl<T: GeoNum> From<Coord<T>> for LineOrPoint<T> {
    fn from(c: Coord<T>) -> Self {
        LineOrPoint::Point(c.into())
    }
}

/// How two segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<T: GeoNum> {
    /// The segments cross at a single point interior to both.
    Proper(Coord<T>),
    /// The segments touch at an end point, or overlap collinearly.
    NonProper(LineOrPoint<T>),
}

impl<T: GeoNum> SegmentIntersection<T> {
    #[inline]
    pub fn is_proper(&self) -> bool {
        matches!(self, SegmentIntersection::Proper(_))
    }

    /// A representative point of the intersection.
    #[inline]
    pub fn coord(&self) -> Coord<T> {
        match self {
            SegmentIntersection::Proper(c) => *c,
            SegmentIntersection::NonProper(geom) => geom.first().coord(),
        }
    }
}

impl<T: GeoNum> LineOrPoint<T> {
    /// Checks if the variant is a line.
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, LineOrPoint::Line(_, _))
    }

    /// Return a [`Line`] representing this geometry. A point becomes a
    /// degenerate line.
    #[inline]
    pub fn line(&self) -> Line<T> {
        match self {
            LineOrPoint::Line(p, q) => Line::new(p.coord(), q.coord()),
            LineOrPoint::Point(p) => Line::new(p.coord(), p.coord()),
        }
    }

    /// Returns the lexicographic first coordinate of the geometry.
    #[inline]
    pub fn first(&self) -> SweepPoint<T> {
        *match self {
            LineOrPoint::Point(p) => p,
            LineOrPoint::Line(p, _) => p,
        }
    }

    /// Returns the lexicographic last coordinate of the geometry.
    #[inline]
    pub fn last(&self) -> SweepPoint<T> {
        *match self {
            LineOrPoint::Point(p) => p,
            LineOrPoint::Line(_, q) => q,
        }
    }

    /// Checks whether `pt` lies on this geometry.
    pub fn contains_point(&self, pt: SweepPoint<T>) -> bool {
        match *self {
            LineOrPoint::Point(p) => p == pt,
            LineOrPoint::Line(p, q) => {
                T::Ker::orient2d(p.coord(), pt.coord(), q.coord()) == Orientation::Collinear
                    && p <= pt
                    && pt <= q
            }
        }
    }
}

impl<T: GeoFloat> LineOrPoint<T> {
    /// Intersect a line with self and return a point, a overlapping segment or `None`.
    ///
    /// The `other` argument must be a line variant (panics otherwise).
    pub fn intersect_line(&self, other: &Self) -> Option<Self> {
        assert!(other.is_line(), "tried to intersect with a point variant!");

        match *self {
            LineOrPoint::Point(p) => other.contains_point(p).then_some(*self),
            LineOrPoint::Line(p, q) => {
                line_intersection(Line::new(p.coord(), q.coord()), other.line()).map(|l| match l {
                    LineIntersection::SinglePoint { intersection, .. } => intersection.into(),
                    LineIntersection::Collinear { intersection } => intersection.into(),
                })
            }
        }
    }

    /// Intersect two line variants and classify the result as proper
    /// or non-proper.
    ///
    /// Returns `None` if either geometry is a point or the lines are
    /// disjoint.
    pub fn classify_intersection(&self, other: &Self) -> Option<SegmentIntersection<T>> {
        if !self.is_line() || !other.is_line() {
            return None;
        }
        line_intersection(self.line(), other.line()).map(|l| match l {
            LineIntersection::SinglePoint {
                intersection,
                is_proper: true,
            } => SegmentIntersection::Proper(intersection),
            LineIntersection::SinglePoint { intersection, .. } => {
                SegmentIntersection::NonProper(intersection.into())
            }
            LineIntersection::Collinear { intersection } => {
                SegmentIntersection::NonProper(intersection.into())
            }
        })
    }
}
