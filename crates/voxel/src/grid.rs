use std::collections::VecDeque;

use hashbrown::HashSet;
use meshkit_core::Point3;

use crate::{VoxelCoord, VoxelError, VoxelFrame};

/// A set of occupied cells in a [`VoxelFrame`].
///
/// Grids are immutable once built; operations such as
/// [`fill_interior`](Self::fill_interior) return a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    frame: VoxelFrame,
    cells: HashSet<VoxelCoord>,
}

impl VoxelGrid {
    pub(crate) fn from_cells(frame: VoxelFrame, cells: HashSet<VoxelCoord>) -> Self {
        debug_assert!(cells.iter().all(|c| frame.contains(*c)));
        Self { frame, cells }
    }

    pub fn frame(&self) -> &VoxelFrame {
        &self.frame
    }

    /// Edge length of one cell.
    pub fn unit(&self) -> f32 {
        self.frame.unit()
    }

    /// World position of the corner of cell `(0, 0, 0)`.
    pub fn origin(&self) -> Point3 {
        self.frame.origin()
    }

    pub fn dims(&self) -> [u32; 3] {
        self.frame.dims()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_occupied(&self, cell: VoxelCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Occupied cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &VoxelCoord> + '_ {
        self.cells.iter()
    }

    /// Occupied cells in ascending `(x, y, z)` order.
    pub fn sorted_cells(&self) -> Vec<VoxelCoord> {
        let mut cells: Vec<VoxelCoord> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    pub fn cell_center(&self, cell: VoxelCoord) -> Point3 {
        self.frame.cell_center(cell)
    }

    /// Total volume of the occupied cells.
    pub fn volume(&self) -> f64 {
        let unit = f64::from(self.frame.unit());
        self.cells.len() as f64 * unit * unit * unit
    }

    /// Solid version of this grid: occupied cells plus every cell enclosed by
    /// them.
    ///
    /// A cell is enclosed when no 6-connected path of empty cells leads from
    /// it out of the grid. Open surfaces therefore enclose nothing.
    pub fn fill_interior(&self) -> VoxelGrid {
        let [dx, dy, dz] = self.frame.dims().map(|d| d as usize + 2);
        let index = |x: usize, y: usize, z: usize| x + dx * (y + dy * z);

        // Padded by one empty layer on every side so the outside is connected.
        let mut blocked = vec![false; dx * dy * dz];
        for c in &self.cells {
            blocked[index(c.x as usize + 1, c.y as usize + 1, c.z as usize + 1)] = true;
        }

        let mut outside = vec![false; blocked.len()];
        let mut queue = VecDeque::from([(0usize, 0usize, 0usize)]);
        outside[0] = true;
        while let Some((x, y, z)) = queue.pop_front() {
            let neighbors = [
                (x.wrapping_sub(1), y, z),
                (x + 1, y, z),
                (x, y.wrapping_sub(1), z),
                (x, y + 1, z),
                (x, y, z.wrapping_sub(1)),
                (x, y, z + 1),
            ];
            for (nx, ny, nz) in neighbors {
                if nx >= dx || ny >= dy || nz >= dz {
                    continue;
                }
                let i = index(nx, ny, nz);
                if !outside[i] && !blocked[i] {
                    outside[i] = true;
                    queue.push_back((nx, ny, nz));
                }
            }
        }

        let mut cells = self.cells.clone();
        for z in 1..dz - 1 {
            for y in 1..dy - 1 {
                for x in 1..dx - 1 {
                    if !outside[index(x, y, z)] {
                        cells.insert(VoxelCoord::new(x as u32 - 1, y as u32 - 1, z as u32 - 1));
                    }
                }
            }
        }

        Self::from_cells(self.frame, cells)
    }
}

/// Intersection over union of the occupied cells of two grids.
///
/// Returns `0.0` when both grids are empty.
///
/// # Errors
///
/// [`VoxelError::InvalidArgument`] if the grids do not share a frame.
pub fn iou(a: &VoxelGrid, b: &VoxelGrid) -> Result<f32, VoxelError> {
    if a.frame != b.frame {
        return Err(VoxelError::InvalidArgument("grids must share a frame"));
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.cells.iter().filter(|c| large.cells.contains(*c)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return Ok(0.0);
    }
    Ok(intersection as f32 / union as f32)
}
