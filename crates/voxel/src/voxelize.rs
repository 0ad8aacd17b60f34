use hashbrown::HashSet;
use meshkit_core::{Point3, TriangleMesh};
use rayon::prelude::*;
use tracing::debug;

use crate::overlap::triangle_box_overlap;
use crate::{VoxelCoord, VoxelError, VoxelFrame, VoxelGrid};

/// Contact slack for triangle/cell tests, in f32 ulps of the triangle's
/// grid coordinates.
const TOUCH_ULPS: f32 = 8.0;

/// Parameters for [`voxelize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelizeParams {
    /// Number of cells along the longest bounding-box axis.
    pub resolution: usize,
    /// Rasterize triangles on the rayon pool.
    pub parallel: bool,
}

impl Default for VoxelizeParams {
    fn default() -> Self {
        Self {
            resolution: 64,
            parallel: true,
        }
    }
}

/// Surface voxelization of `mesh` with `resolution` cells along the longest
/// axis of its bounding box.
///
/// # Errors
///
/// [`VoxelError::InvalidArgument`] if `resolution` is zero,
/// [`VoxelError::DegenerateMesh`] if the mesh's bounding box has no extent.
pub fn voxelize(mesh: &TriangleMesh, resolution: usize) -> Result<VoxelGrid, VoxelError> {
    voxelize_with(
        mesh,
        &VoxelizeParams {
            resolution,
            ..VoxelizeParams::default()
        },
    )
}

/// [`voxelize`] with explicit parameters.
pub fn voxelize_with(mesh: &TriangleMesh, params: &VoxelizeParams) -> Result<VoxelGrid, VoxelError> {
    let frame = VoxelFrame::from_aabb(&mesh.aabb(), params.resolution)?;
    Ok(voxelize_in_frame(mesh, &frame, params.parallel))
}

/// Marks every cell of `frame` that a triangle of `mesh` touches.
///
/// Parts of the mesh outside the frame are ignored. The result does not
/// depend on `parallel`.
pub fn voxelize_in_frame(mesh: &TriangleMesh, frame: &VoxelFrame, parallel: bool) -> VoxelGrid {
    let cells = if parallel {
        (0..mesh.triangle_count())
            .into_par_iter()
            .fold(HashSet::new, |mut cells, t| {
                mark_triangle(&mesh.triangle_vertices(t), frame, &mut cells);
                cells
            })
            .reduce(HashSet::new, |a, b| {
                if a.len() < b.len() {
                    merge(b, a)
                } else {
                    merge(a, b)
                }
            })
    } else {
        let mut cells = HashSet::new();
        for tri in mesh.iter_triangles() {
            mark_triangle(&tri, frame, &mut cells);
        }
        cells
    };

    debug!(
        triangles = mesh.triangle_count(),
        unit = frame.unit(),
        dims = ?frame.dims(),
        cells = cells.len(),
        "voxelized mesh surface"
    );

    VoxelGrid::from_cells(*frame, cells)
}

fn merge(mut into: HashSet<VoxelCoord>, from: HashSet<VoxelCoord>) -> HashSet<VoxelCoord> {
    into.extend(from);
    into
}

fn mark_triangle(tri: &[Point3; 3], frame: &VoxelFrame, cells: &mut HashSet<VoxelCoord>) {
    // Vertex cells keep zero-area and sub-cell triangles from vanishing.
    for v in tri {
        if let Some(cell) = frame.cell_of(v) {
            cells.insert(cell);
        }
    }

    let mut min = tri[0];
    let mut max = tri[0];
    for v in &tri[1..] {
        for axis in 0..3 {
            min[axis] = min[axis].min(v[axis]);
            max[axis] = max[axis].max(v[axis]);
        }
    }
    let Some((lo, hi)) = frame.cell_span(&min, &max) else {
        return;
    };

    // Tested in grid units so cell boxes are exact. The slack covers the
    // rounding of the vertex transform on shared faces and stays a tiny
    // fraction of a cell at any resolution.
    let local = tri.map(|v| frame.to_grid(&v));
    let scale = local.iter().flatten().fold(1.0f32, |m, v| m.max(v.abs()));
    let h = 0.5 + TOUCH_ULPS * f32::EPSILON * scale;
    let half = [h, h, h];
    for z in lo.z..=hi.z {
        for y in lo.y..=hi.y {
            for x in lo.x..=hi.x {
                let cell = VoxelCoord::new(x, y, z);
                if cells.contains(&cell) {
                    continue;
                }
                let center = [x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5];
                if triangle_box_overlap(&local, &center, &half) {
                    cells.insert(cell);
                }
            }
        }
    }
}
