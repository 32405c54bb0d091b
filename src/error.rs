//! Error types for prepared predicates.

use thiserror::Error;

/// Errors raised by prepared-geometry construction and predicate
/// evaluation.
///
/// All operations are pure; an error always signals an unsuitable input,
/// never a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreparedError {
    /// A facade was built from a geometry of the wrong kind.
    #[error("expected a {expected} geometry, found {found}")]
    UnexpectedGeometry {
        /// Kind of geometry the facade accepts.
        expected: &'static str,
        /// Name of the geometry variant that was supplied.
        found: &'static str,
    },

    /// An input contains a NaN or infinite ordinate.
    #[error("geometry contains a non-finite coordinate")]
    NonFiniteCoordinate,

    /// Containment of a collection holding polygons is not supported.
    #[error("{predicate} is not supported for a geometry collection with polygonal members")]
    UnsupportedCollection {
        /// Predicate that was requested.
        predicate: &'static str,
    },
}

/// Result type for prepared predicates.
pub type Result<T> = std::result::Result<T, PreparedError>;
