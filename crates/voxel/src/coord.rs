/// Integer cell coordinate, relative to a grid's origin.
///
/// Coordinates are non-negative: cell `(0, 0, 0)` starts at the origin
/// corner. Ordering is lexicographic on `(x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VoxelCoord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl VoxelCoord {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    pub const fn as_array(self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    pub const fn from_array(a: [u32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<[u32; 3]> for VoxelCoord {
    fn from(a: [u32; 3]) -> Self {
        Self::from_array(a)
    }
}
