#![forbid(unsafe_code)]

pub mod correspondence;
pub mod error;
pub mod shape_match;
pub mod transform;

pub use correspondence::{find_correspondences, rmse, Correspondence};
pub use error::RegistrationError;
pub use shape_match::{shape_match, ShapeMatch};
pub use transform::{apply_transform, transform_mesh, RigidTransform};
