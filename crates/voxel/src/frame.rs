use meshkit_core::{Aabb, Point3};

use crate::{VoxelCoord, VoxelError};

/// Slack, as a fraction of the cell count, when snapping extents to whole
/// cells and when deciding whether a point lies on the grid's boundary.
const SNAP: f32 = 2e-6;

/// Placement and size of a uniform voxel grid.
///
/// Cell `(i, j, k)` spans `origin + [i, i + 1] * unit` on x, and likewise on
/// y and z. Cells are closed boxes: a point on a shared face belongs to both
/// neighbours for overlap purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelFrame {
    origin: Point3,
    unit: f32,
    dims: [u32; 3],
}

impl VoxelFrame {
    /// Frame anchored at `aabb.min` whose longest axis is split into
    /// `resolution` cells.
    ///
    /// `unit = max_extent / resolution`. Shorter axes get
    /// `max(1, ceil(extent / unit))` cells, so a flat box still has one layer.
    ///
    /// # Errors
    ///
    /// [`VoxelError::InvalidArgument`] if `resolution` is zero or does not fit
    /// in `u32`, [`VoxelError::DegenerateMesh`] if the box is empty or has zero
    /// (or non-finite) extent on every axis.
    pub fn from_aabb(aabb: &Aabb, resolution: usize) -> Result<Self, VoxelError> {
        if resolution == 0 {
            return Err(VoxelError::InvalidArgument("resolution must be at least 1"));
        }
        if u32::try_from(resolution).is_err() {
            return Err(VoxelError::InvalidArgument("resolution does not fit in u32"));
        }

        let max_extent = aabb.max_extent();
        if aabb.is_empty() || !max_extent.is_finite() || max_extent <= 0.0 {
            return Err(VoxelError::DegenerateMesh { max_extent });
        }

        let unit = max_extent / resolution as f32;
        let extent = aabb.extent();
        let dims = extent.map(|e| cells_along(e, unit));

        Ok(Self {
            origin: aabb.min,
            unit,
            dims,
        })
    }

    /// Frame with explicit placement.
    ///
    /// # Errors
    ///
    /// [`VoxelError::InvalidArgument`] if `unit` is not a positive finite
    /// number, `origin` is not finite, or any dimension is zero.
    pub fn new(origin: Point3, unit: f32, dims: [u32; 3]) -> Result<Self, VoxelError> {
        if !unit.is_finite() || unit <= 0.0 {
            return Err(VoxelError::InvalidArgument("unit must be positive and finite"));
        }
        if !origin.iter().all(|v| v.is_finite()) {
            return Err(VoxelError::InvalidArgument("origin must be finite"));
        }
        if dims.contains(&0) {
            return Err(VoxelError::InvalidArgument("grid dimensions must be non-zero"));
        }
        Ok(Self { origin, unit, dims })
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Edge length of one cell.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// Number of cells along each axis.
    pub fn dims(&self) -> [u32; 3] {
        self.dims
    }

    pub fn cell_count(&self) -> u64 {
        self.dims.iter().map(|&d| u64::from(d)).product()
    }

    pub fn contains(&self, cell: VoxelCoord) -> bool {
        cell.x < self.dims[0] && cell.y < self.dims[1] && cell.z < self.dims[2]
    }

    pub fn cell_center(&self, cell: VoxelCoord) -> Point3 {
        let c = cell.as_array();
        [
            self.origin[0] + (c[0] as f32 + 0.5) * self.unit,
            self.origin[1] + (c[1] as f32 + 0.5) * self.unit,
            self.origin[2] + (c[2] as f32 + 0.5) * self.unit,
        ]
    }

    /// `point` in grid units, where cell `(i, j, k)` spans `[i, i + 1]` on x
    /// and likewise on y and z.
    pub fn to_grid(&self, point: &Point3) -> Point3 {
        [
            (point[0] - self.origin[0]) / self.unit,
            (point[1] - self.origin[1]) / self.unit,
            (point[2] - self.origin[2]) / self.unit,
        ]
    }

    /// The cell containing `point`, or `None` if it lies outside the grid.
    ///
    /// Points on the far boundary map into the last cell.
    pub fn cell_of(&self, point: &Point3) -> Option<VoxelCoord> {
        self.cell_span(point, point).map(|(lo, _)| lo)
    }

    /// Inclusive range of cells touched by the box `[min, max]`, clipped to
    /// the grid. `None` if the box misses the grid entirely.
    pub fn cell_span(&self, min: &Point3, max: &Point3) -> Option<(VoxelCoord, VoxelCoord)> {
        let g_min = self.to_grid(min);
        let g_max = self.to_grid(max);
        let mut lo = [0u32; 3];
        let mut hi = [0u32; 3];
        for axis in 0..3 {
            let (f_min, f_max) = (g_min[axis], g_max[axis]);
            let limit = self.dims[axis] as f32;
            let tol = slack(limit);
            // Negated comparisons reject NaN as well.
            if !(f_max >= -tol && f_min <= limit + tol) {
                return None;
            }
            lo[axis] = self.clamp_cell(axis, f_min);
            hi[axis] = self.clamp_cell(axis, f_max);
        }
        Some((VoxelCoord::from_array(lo), VoxelCoord::from_array(hi)))
    }

    fn clamp_cell(&self, axis: usize, f: f32) -> u32 {
        let last = self.dims[axis] - 1;
        if f <= 0.0 {
            0
        } else {
            // `as` saturates, so huge values clamp instead of wrapping.
            (f.floor() as u64).min(u64::from(last)) as u32
        }
    }
}

fn slack(cells: f32) -> f32 {
    SNAP * cells.max(1.0)
}

fn cells_along(extent: f32, unit: f32) -> u32 {
    let ratio = extent / unit;
    let nearest = ratio.round();
    let n = if (ratio - nearest).abs() <= slack(ratio) {
        nearest
    } else {
        ratio.ceil()
    };
    if n >= 1.0 {
        n as u32
    } else {
        1
    }
}
