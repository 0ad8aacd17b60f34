//! Error types for spatial index queries.

/// Errors that can occur while querying a [`KdTree`](crate::KdTree).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The index holds no points, so there is nothing to return.
    #[error("spatial index is empty")]
    EmptyIndex,

    /// A query parameter is out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
