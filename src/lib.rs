//! Prepared spatial predicates and distance computation on [`geo`]
//! geometries.
//!
//! 1. [Prepared Predicates](#prepared-predicates)
//! 1. [Distance](#distance)
//!
//! # Prepared Predicates
//!
//! A prepared geometry wraps a target with indices that are built once
//! and reused across many `contains`, `covers`, `contains_properly` and
//! `intersects` queries. Use [`prepare`] to wrap any geometry, or
//! [`PreparedPolygon`] directly for polygonal targets. Most queries are
//! decided by locating test vertices in the target and finding segment
//! intersections through an R-tree; only inputs whose boundaries touch
//! fall back to the full DE-9IM computation of [`Relate`].
//!
//! An empty geometry contains nothing, and is contained by, covered by
//! and intersects nothing. A test lying wholly on the boundary of the
//! target is covered, but not contained.
//!
//! ## Usage
//!
//! ```rust
//! use geo::{polygon, Geometry, LineString};
//! use geo_prepared::prepare;
//!
//! let square: Geometry<f64> =
//!     polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
//! let prepared = prepare(square).unwrap();
//!
//! let crossing: Geometry<f64> = LineString::from(vec![(5., -5.), (5., 15.)]).into();
//! assert!(prepared.intersects(&crossing).unwrap());
//! assert!(!prepared.contains(&crossing).unwrap());
//! ```
//!
//! # Distance
//!
//! [`DistanceOp`] computes the minimum distance between two geometries
//! of any type, along with the nearest points and the components they
//! lie on. The one-shot [`distance`], [`is_within_distance`] and
//! [`nearest_points`] functions wrap it.
//!
//! [`Relate`]: geo::Relate
//! [`DistanceOp`]: distance::DistanceOp
mod error;
pub use error::{PreparedError, Result};

mod sweep_point;
pub use sweep_point::SweepPoint;

mod line_or_point;
pub use line_or_point::{LineOrPoint, SegmentIntersection};

pub mod components;

pub mod envelope;

pub mod locate;
pub use locate::{IndexedPointInAreaLocator, Location, PointLocator, SimplePointLocator};

pub mod crossings;
pub use crossings::{IntersectionSummary, SegmentIntersectionFinder};

pub mod prepared;
pub use prepared::{prepare, PreparedGeometry, PreparedLineString, PreparedPoint, PreparedPolygon};

pub mod distance;
pub use distance::{is_within_distance, nearest_points, DistanceOp, GeometryLocation};

use geo::{GeoFloat, Geometry};

/// Whether `target` contains `test`. Prepares `target` for this one
/// query; use [`prepare`] when testing the same target repeatedly.
pub fn contains<T: GeoFloat>(target: &Geometry<T>, test: &Geometry<T>) -> Result<bool> {
    prepare(target.clone())?.contains(test)
}

/// Whether `target` covers `test`.
pub fn covers<T: GeoFloat>(target: &Geometry<T>, test: &Geometry<T>) -> Result<bool> {
    prepare(target.clone())?.covers(test)
}

/// Whether `target` contains `test` without `test` touching the
/// boundary of `target`.
pub fn contains_properly<T: GeoFloat>(target: &Geometry<T>, test: &Geometry<T>) -> Result<bool> {
    prepare(target.clone())?.contains_properly(test)
}

/// Whether the geometries share at least one point.
pub fn intersects<T: GeoFloat>(target: &Geometry<T>, test: &Geometry<T>) -> Result<bool> {
    prepare(target.clone())?.intersects(test)
}

/// Minimum distance between two geometries; zero if either is empty.
pub fn distance<T: GeoFloat>(a: &Geometry<T>, b: &Geometry<T>) -> T {
    distance::distance(a, b)
}

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
