use meshkit_core::{Point3, PointCloud, TriangleMesh};
use nalgebra::{Matrix3, Vector3};

/// Rotation followed by translation: `p' = R * p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Row-major rotation matrix.
    pub rotation: [[f32; 3]; 3],
    pub translation: [f32; 3],
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn is_identity(&self, eps: f32) -> bool {
        let id = Self::identity();
        let rotation_ok = (0..3)
            .all(|r| (0..3).all(|c| (self.rotation[r][c] - id.rotation[r][c]).abs() <= eps));
        rotation_ok && self.translation.iter().all(|t| t.abs() <= eps)
    }

    pub fn apply_to_point(&self, p: &Point3) -> Point3 {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + t[0],
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + t[1],
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + t[2],
        ]
    }

    /// Apply `self` first, then `other`.
    ///
    /// `R = other.R * self.R`, `t = other.R * self.t + other.t`.
    pub fn compose(&self, other: &RigidTransform) -> RigidTransform {
        let r_self = mat3_from_arrays(&self.rotation);
        let r_other = mat3_from_arrays(&other.rotation);
        let t_self = Vector3::from(self.translation);
        let t_other = Vector3::from(other.translation);

        let r_new = r_other * r_self;
        let t_new = r_other * t_self + t_other;

        RigidTransform {
            rotation: mat3_to_arrays(&r_new),
            translation: [t_new[0], t_new[1], t_new[2]],
        }
    }

    /// The transform undoing `self`: `R^T * (p - t)`.
    pub fn inverse(&self) -> RigidTransform {
        let r_t = mat3_from_arrays(&self.rotation).transpose();
        let t = -(r_t * Vector3::from(self.translation));
        RigidTransform {
            rotation: mat3_to_arrays(&r_t),
            translation: [t[0], t[1], t[2]],
        }
    }
}

/// A copy of `cloud` with every point moved by `transform`.
pub fn apply_transform(cloud: &PointCloud, transform: &RigidTransform) -> PointCloud {
    cloud
        .iter_points()
        .map(|p| transform.apply_to_point(&p))
        .collect()
}

/// A copy of `mesh` with every vertex moved by `transform`; topology is kept.
pub fn transform_mesh(mesh: &TriangleMesh, transform: &RigidTransform) -> TriangleMesh {
    mesh.map_vertices(|p| transform.apply_to_point(p))
}

pub(crate) fn mat3_to_arrays(m: &Matrix3<f32>) -> [[f32; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

pub(crate) fn mat3_from_arrays(a: &[[f32; 3]; 3]) -> Matrix3<f32> {
    Matrix3::new(
        a[0][0], a[0][1], a[0][2], a[1][0], a[1][1], a[1][2], a[2][0], a[2][1], a[2][2],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const QUARTER_TURN_Z: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];

    #[test]
    fn identity_leaves_cloud_alone() {
        let cloud = PointCloud::from_xyz(vec![1.0, -2.0], vec![3.0, 0.5], vec![5.0, 7.0]);
        let moved = apply_transform(&cloud, &RigidTransform::identity());
        assert_eq!(moved, cloud);
        assert!(RigidTransform::default().is_identity(0.0));
    }

    #[test]
    fn translation_moves_every_point() {
        let cloud = PointCloud::from_xyz(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]);
        let moved = apply_transform(&cloud, &RigidTransform::from_translation([10.0, 20.0, 30.0]));
        assert_eq!(moved.point(0), [11.0, 23.0, 35.0]);
        assert_eq!(moved.point(1), [12.0, 24.0, 36.0]);
    }

    #[test]
    fn rotation_of_point() {
        let t = RigidTransform {
            rotation: QUARTER_TURN_Z,
            translation: [0.0; 3],
        };
        let p = t.apply_to_point(&[1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 0.0);
        assert_relative_eq!(p[1], 1.0);
        assert_relative_eq!(p[2], 0.0);
    }

    #[test]
    fn compose_rotation_then_translation() {
        let rotate = RigidTransform {
            rotation: QUARTER_TURN_Z,
            translation: [0.0; 3],
        };
        let shift = RigidTransform::from_translation([1.0, 0.0, 0.0]);

        // (1, 0, 0) -> (0, 1, 0) -> (1, 1, 0)
        let p = rotate.compose(&shift).apply_to_point(&[1.0, 0.0, 0.0]);
        assert_relative_eq!(p[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(p[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn transform_mesh_keeps_topology() {
        let mesh = TriangleMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 2, 1]],
        )
        .unwrap();
        let moved = transform_mesh(&mesh, &RigidTransform::from_translation([0.0, 0.0, 2.0]));
        assert_eq!(moved.triangles(), mesh.triangles());
        assert_eq!(moved.vertices()[1], [1.0, 0.0, 2.0]);
        assert_eq!(moved.aabb().min, [0.0, 0.0, 2.0]);
    }

    proptest! {
        #[test]
        fn inverse_undoes_transform(
            angle in -3.1f32..3.1,
            t in (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0),
            p in (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0),
        ) {
            let (s, c) = angle.sin_cos();
            let transform = RigidTransform {
                rotation: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
                translation: [t.0, t.1, t.2],
            };
            let point = [p.0, p.1, p.2];
            let back = transform.inverse().apply_to_point(&transform.apply_to_point(&point));
            for a in 0..3 {
                prop_assert!((back[a] - point[a]).abs() < 1e-3);
            }
            prop_assert!(transform.compose(&transform.inverse()).is_identity(1e-4));
        }
    }
}
