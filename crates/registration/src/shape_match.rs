//! Rigid alignment of two meshes that share triangle order.

use meshkit_core::{Point3, TriangleMesh};
use nalgebra::{Matrix3, Vector3};
use tracing::info;

use crate::transform::mat3_to_arrays;
use crate::{RegistrationError, RigidTransform};

/// Outcome of [`shape_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeMatch {
    /// Maps `source` onto `target`.
    pub transform: RigidTransform,
    /// Root mean square distance between paired centroids after alignment.
    pub rmse: f32,
}

/// Best rigid transform taking `source` onto `target`, pairing triangle `i`
/// of one mesh with triangle `i` of the other.
///
/// Triangle centroids are aligned with the Kabsch method: SVD of the
/// cross-covariance of the centred centroid sets, with the last axis flipped
/// when the fit would otherwise be a reflection.
///
/// # Errors
///
/// [`RegistrationError::EmptyMesh`] if either mesh has no triangles,
/// [`RegistrationError::TriangleCountMismatch`] if the counts differ.
pub fn shape_match(source: &TriangleMesh, target: &TriangleMesh) -> Result<ShapeMatch, RegistrationError> {
    if source.is_empty() || target.is_empty() {
        return Err(RegistrationError::EmptyMesh);
    }
    if source.triangle_count() != target.triangle_count() {
        return Err(RegistrationError::TriangleCountMismatch {
            source_count: source.triangle_count(),
            target_count: target.triangle_count(),
        });
    }

    let src: Vec<Vector3<f64>> = source.triangle_centroids().iter().map(widen).collect();
    let tgt: Vec<Vector3<f64>> = target.triangle_centroids().iter().map(widen).collect();
    let src_centroid = mean(&src);
    let tgt_centroid = mean(&tgt);

    let mut h = Matrix3::<f64>::zeros();
    for (s, t) in src.iter().zip(&tgt) {
        h += (s - src_centroid) * (t - tgt_centroid).transpose();
    }

    let svd = h.svd(true, true);
    let u = svd.u.ok_or(RegistrationError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(RegistrationError::SvdFailed)?;

    let mut rotation = v_t.transpose() * u.transpose();
    if rotation.determinant() < 0.0 {
        let mut v = v_t.transpose();
        for i in 0..3 {
            v[(i, 2)] = -v[(i, 2)];
        }
        rotation = v * u.transpose();
    }
    let translation = tgt_centroid - rotation * src_centroid;

    let sum_sq: f64 = src
        .iter()
        .zip(&tgt)
        .map(|(s, t)| (rotation * s + translation - t).norm_squared())
        .sum();
    let rmse = (sum_sq / src.len() as f64).sqrt() as f32;

    let transform = RigidTransform {
        rotation: mat3_to_arrays(&rotation.cast::<f32>()),
        translation: [
            translation[0] as f32,
            translation[1] as f32,
            translation[2] as f32,
        ],
    };

    info!(triangles = src.len(), rmse, "shape match");
    Ok(ShapeMatch { transform, rmse })
}

fn widen(p: &Point3) -> Vector3<f64> {
    Vector3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
}

fn mean(points: &[Vector3<f64>]) -> Vector3<f64> {
    let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}
