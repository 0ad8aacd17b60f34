#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod error;
pub mod mesh;

pub use bbox::Aabb;
pub use cloud::PointCloud;
pub use error::MeshError;
pub use mesh::{compute_aabb, Triangle, TriangleMesh};

/// A point in 3D space.
pub type Point3 = [f32; 3];

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_distance(a: &Point3, b: &Point3) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}
