//! Error types for geometry construction.

/// Errors raised while assembling geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error(
        "triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices"
    )]
    InvalidArgument {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}
