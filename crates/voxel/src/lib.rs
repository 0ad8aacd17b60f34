#![forbid(unsafe_code)]
//! Surface voxelization of triangle meshes.
//!
//! A mesh is rasterized into a [`VoxelGrid`] whose cell edge is the longest
//! side of the mesh's bounding box divided by the requested resolution. Only
//! cells touched by the surface are occupied; see
//! [`VoxelGrid::fill_interior`] for solids.

pub mod coord;
pub mod error;
pub mod frame;
pub mod grid;
pub mod overlap;
pub mod similarity;
pub mod voxelize;

pub use coord::VoxelCoord;
pub use error::VoxelError;
pub use frame::VoxelFrame;
pub use grid::{iou, VoxelGrid};
pub use meshkit_core::compute_aabb;
pub use overlap::triangle_box_overlap;
pub use similarity::mesh_similarity;
pub use voxelize::{voxelize, voxelize_in_frame, voxelize_with, VoxelizeParams};
