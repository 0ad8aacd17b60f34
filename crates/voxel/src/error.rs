//! Error types for voxelization.

/// Errors that can occur while voxelizing a mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum VoxelError {
    /// The mesh has no spatial extent, so no voxel size can be derived.
    #[error("mesh is degenerate: largest bounding box extent is {max_extent}")]
    DegenerateMesh {
        /// Largest edge of the mesh's bounding box.
        max_extent: f32,
    },

    /// A parameter is out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
