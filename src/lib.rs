#![forbid(unsafe_code)]
//! KD-tree nearest-neighbour search and triangle-mesh voxelization.
//!
//! This crate re-exports the workspace members:
//!
//! - [`geometry`]: points, clouds, meshes and bounding boxes
//! - [`spatial`]: the [`KdTree`] index
//! - [`voxel`]: surface voxelization into a [`VoxelGrid`]
//! - [`registration`]: correspondences and rigid shape matching
//!
//! ```
//! use meshkit::{voxelize, KdTree, PointCloud, TriangleMesh};
//!
//! let cloud = PointCloud::from_points(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
//! let tree = KdTree::build(&cloud);
//! let hit = tree.nearest(&[0.1, 0.1, 0.0]).unwrap();
//! assert_eq!(hit.index, 0);
//!
//! let mesh = TriangleMesh::new(cloud.to_points(), vec![[0, 1, 2]]).unwrap();
//! let grid = voxelize(&mesh, 1).unwrap();
//! assert_eq!(grid.len(), 1);
//! ```

pub mod shapes;

pub use meshkit_core as geometry;
pub use meshkit_registration as registration;
pub use meshkit_spatial as spatial;
pub use meshkit_voxel as voxel;

pub use meshkit_core::{compute_aabb, Aabb, MeshError, Point3, PointCloud, Triangle, TriangleMesh};
pub use meshkit_registration::{
    find_correspondences, shape_match, Correspondence, RegistrationError, RigidTransform,
};
pub use meshkit_spatial::{KdTree, Neighbor, NeighborResult, SpatialError};
pub use meshkit_voxel::{
    iou, mesh_similarity, voxelize, voxelize_with, VoxelCoord, VoxelError, VoxelGrid,
    VoxelizeParams,
};
