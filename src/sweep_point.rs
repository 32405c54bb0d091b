use std::cmp::Ordering;

use geo::{Coord, GeoNum};

/// Wraps a [`Coord`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coord` doesn't implement these. Segments
/// are normalized with this ordering so that a segment and its reverse
/// index, intersect and measure identically.
///
/// The comparison uses [`GeoNum::total_cmp`], so non-finite ordinates
/// order consistently instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint<T: GeoNum>(Coord<T>);

impl<T: GeoNum> SweepPoint<T> {
    /// Returns the underlying coordinate.
    #[inline]
    pub fn coord(&self) -> Coord<T> {
        self.0
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: GeoNum> PartialOrd for SweepPoint<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: GeoNum> Ord for SweepPoint<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .total_cmp(&other.0.x)
            .then_with(|| self.0.y.total_cmp(&other.0.y))
    }
}

impl<T: GeoNum> PartialEq for SweepPoint<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoNum> Eq for SweepPoint<T> {}

impl<T: GeoNum> From<Coord<T>> for SweepPoint<T> {
    #[inline]
    fn from(pt: Coord<T>) -> Self {
        SweepPoint(pt)
    }
}

impl<T: GeoNum> From<(T, T)> for SweepPoint<T> {
    #[inline]
    fn from(pt: (T, T)) -> Self {
        SweepPoint(pt.into())
    }
}
