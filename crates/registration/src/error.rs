//! Error types for correspondence search and shape matching.

use meshkit_spatial::SpatialError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error(transparent)]
    Spatial(#[from] SpatialError),

    /// Shape matching pairs triangles by index, so counts must agree.
    #[error("triangle counts differ: source has {source_count}, target has {target_count}")]
    TriangleCountMismatch {
        source_count: usize,
        target_count: usize,
    },

    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The cross-covariance decomposition did not yield both bases.
    #[error("SVD computation failed")]
    SvdFailed,
}
