//! Indexed segment-intersection finding.
//!
//! A [`SegmentIntersectionFinder`] is built once over the segments of a
//! target geometry. It then answers whether any segment of a test set
//! intersects any target segment, and classifies the intersections it
//! finds (see [`IntersectionSummary`]).
//!
//! Candidate pairs come from an R-tree join: the target segments are
//! bulk-loaded once; each query bulk-loads the test segments and walks
//! [`RTree::intersection_candidates_with_other_tree`]. Only candidate
//! pairs with overlapping envelopes are tested exactly, which is
//! typically much less than the brute-force `n * m` pairs.
//!
//! Segments are normalized through [`LineOrPoint`] before testing, so
//! zero-length segments (repeated vertices) are dropped and a segment
//! and its reverse classify identically.
use geo::{GeoFloat, Line};
use log::{debug, trace};
use rstar::{primitives::GeomWithData, RTree};

use crate::line_or_point::{LineOrPoint, SegmentIntersection};

type IndexedSegment<T> = GeomWithData<Line<T>, usize>;

/// The intersection types present between two segment sets.
///
/// Produced fresh by every [`SegmentIntersectionFinder::classify`]
/// call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionSummary {
    /// Some pair of segments intersects.
    pub has_intersection: bool,
    /// Some pair crosses at a point interior to both segments.
    pub has_proper: bool,
    /// Some pair touches at an end point or overlaps collinearly.
    pub has_non_proper: bool,
}

impl IntersectionSummary {
    pub(crate) fn record<T: GeoFloat>(&mut self, isec: &SegmentIntersection<T>) {
        self.has_intersection = true;
        if isec.is_proper() {
            self.has_proper = true;
        } else {
            self.has_non_proper = true;
        }
    }

    /// Whether further intersections cannot change the summary.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.has_proper && self.has_non_proper
    }
}

/// Finds intersections between a fixed set of target segments and
/// arbitrary test segments.
pub struct SegmentIntersectionFinder<T: GeoFloat> {
    index: RTree<IndexedSegment<T>>,
}

impl<T: GeoFloat> std::fmt::Debug for SegmentIntersectionFinder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentIntersectionFinder")
            .field("segments", &self.index.size())
            .finish()
    }
}

fn normalized<T, I>(segments: I) -> Vec<IndexedSegment<T>>
where
    T: GeoFloat,
    I: IntoIterator<Item = Line<T>>,
{
    segments
        .into_iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let geom = LineOrPoint::from(line);
            geom.is_line().then(|| GeomWithData::new(geom.line(), idx))
        })
        .collect()
}

impl<T: GeoFloat> SegmentIntersectionFinder<T> {
    /// Index the target segments.
    pub fn new<I: IntoIterator<Item = Line<T>>>(segments: I) -> Self {
        let segments = normalized(segments);
        debug!(
            "segment intersection finder: indexing {num} segments",
            num = segments.len()
        );
        SegmentIntersectionFinder {
            index: RTree::bulk_load(segments),
        }
    }

    /// Number of indexed (non-degenerate) segments.
    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every intersecting pair until `visit` returns `false`.
    fn for_each_intersection<I, F>(&self, test: I, mut visit: F)
    where
        I: IntoIterator<Item = Line<T>>,
        F: FnMut(&SegmentIntersection<T>) -> bool,
    {
        if self.is_empty() {
            return;
        }
        let test_index = RTree::bulk_load(normalized(test));
        for (target, test) in self.index.intersection_candidates_with_other_tree(&test_index) {
            let a = LineOrPoint::from(*target.geom());
            let b = LineOrPoint::from(*test.geom());
            if let Some(isec) = a.classify_intersection(&b) {
                trace!(
                    "segment {t} x test segment {s}: {isec:?}",
                    t = target.data,
                    s = test.data
                );
                if !visit(&isec) {
                    return;
                }
            }
        }
    }

    /// Whether any test segment intersects a target segment.
    pub fn intersects<I: IntoIterator<Item = Line<T>>>(&self, test: I) -> bool {
        let mut found = false;
        self.for_each_intersection(test, |_| {
            found = true;
            false
        });
        found
    }

    /// Find all intersection types between the test segments and the
    /// target segments.
    ///
    /// Stops early once both proper and non-proper intersections have
    /// been seen.
    pub fn classify<I: IntoIterator<Item = Line<T>>>(&self, test: I) -> IntersectionSummary {
        let mut summary = IntersectionSummary::default();
        self.for_each_intersection(test, |isec| {
            summary.record(isec);
            !summary.is_complete()
        });
        debug!("classified intersections: {summary:?}");
        summary
    }
}
