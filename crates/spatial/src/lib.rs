#![forbid(unsafe_code)]

pub mod error;
pub mod kdtree;
pub mod neighbor;

pub use error::SpatialError;
pub use kdtree::KdTree;
pub use neighbor::{Neighbor, NeighborResult};
