use meshkit_core::TriangleMesh;
use tracing::info;

use crate::{iou, voxelize_in_frame, VoxelError, VoxelFrame};

/// Volumetric similarity of two closed meshes in `[0, 1]`.
///
/// Both meshes are voxelized in one frame spanning the union of their
/// bounding boxes, their interiors are filled, and the IoU of the solid
/// grids is returned. Open meshes only contribute their surface cells.
///
/// # Errors
///
/// Same as [`voxelize`](crate::voxelize), applied to the union box.
pub fn mesh_similarity(a: &TriangleMesh, b: &TriangleMesh, resolution: usize) -> Result<f32, VoxelError> {
    let frame = VoxelFrame::from_aabb(&a.aabb().union(&b.aabb()), resolution)?;

    let (grid_a, grid_b) = rayon::join(
        || voxelize_in_frame(a, &frame, true).fill_interior(),
        || voxelize_in_frame(b, &frame, true).fill_interior(),
    );
    let score = iou(&grid_a, &grid_b)?;

    info!(
        resolution,
        cells_a = grid_a.len(),
        cells_b = grid_b.len(),
        iou = score,
        "mesh similarity"
    );
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use meshkit_core::Point3;

    fn cube(min: Point3, size: f32) -> TriangleMesh {
        let vertices = (0..8u32)
            .map(|i| {
                [
                    min[0] + size * (i & 1) as f32,
                    min[1] + size * ((i >> 1) & 1) as f32,
                    min[2] + size * ((i >> 2) & 1) as f32,
                ]
            })
            .collect();
        let faces = [
            [0, 2, 3, 1],
            [4, 5, 7, 6],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 4, 6, 2],
            [1, 3, 7, 5],
        ];
        let triangles = faces
            .iter()
            .flat_map(|f| [[f[0], f[1], f[2]], [f[0], f[2], f[3]]])
            .collect();
        TriangleMesh::new(vertices, triangles).unwrap()
    }

    #[test]
    fn identical_meshes_score_one() {
        let c = cube([0.0; 3], 1.0);
        assert_eq!(mesh_similarity(&c, &c, 16).unwrap(), 1.0);
    }

    #[test]
    fn nested_cubes_score_volume_ratio() {
        // Union frame is [0, 4]^3 at one cell per unit. The inner cube keeps
        // off cell faces so it touches only the central 2^3 cells.
        let outer = cube([0.0; 3], 4.0);
        let inner = cube([1.25; 3], 1.5);
        let score = mesh_similarity(&outer, &inner, 4).unwrap();
        assert_relative_eq!(score, 8.0 / 64.0);
    }

    #[test]
    fn distant_meshes_score_zero() {
        let a = cube([0.0; 3], 1.0);
        let b = cube([10.0, 0.0, 0.0], 1.0);
        assert_eq!(mesh_similarity(&a, &b, 32).unwrap(), 0.0);
    }

    #[test]
    fn degenerate_union_fails() {
        let p = TriangleMesh::new(vec![[1.0; 3]], vec![[0, 0, 0]]).unwrap();
        assert!(matches!(
            mesh_similarity(&p, &p, 8),
            Err(VoxelError::DegenerateMesh { .. })
        ));
    }
}
