use hashbrown::HashSet;

use crate::{Aabb, Point3};

/// An ordered set of 3D points stored as structure-of-arrays.
///
/// A point's position in the cloud is its identity: neighbor queries and
/// correspondences report indices into this order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self { x, y, z }
    }

    pub fn from_points(points: &[Point3]) -> Self {
        let mut cloud = Self {
            x: Vec::with_capacity(points.len()),
            y: Vec::with_capacity(points.len()),
            z: Vec::with_capacity(points.len()),
        };
        for p in points {
            cloud.push(*p);
        }
        cloud
    }

    pub fn push(&mut self, p: Point3) {
        self.x.push(p[0]);
        self.y.push(p[1]);
        self.z.push(p[2]);
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_xyz(&self.x, &self.y, &self.z)
    }

    pub fn point(&self, i: usize) -> Point3 {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Array-of-structs copy of the points.
    pub fn to_points(&self) -> Vec<Point3> {
        self.iter_points().collect()
    }

    /// Drop exact duplicate points, keeping the first occurrence of each.
    ///
    /// Points compare by bit pattern, so `0.0` and `-0.0` stay distinct and
    /// identical NaN payloads collapse. The order of the retained points is
    /// preserved.
    pub fn deduplicated(&self) -> Self {
        let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(self.len());
        let mut out = Self::new();
        for p in self.iter_points() {
            if seen.insert([p[0].to_bits(), p[1].to_bits(), p[2].to_bits()]) {
                out.push(p);
            }
        }
        out
    }
}

impl FromIterator<Point3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        let mut cloud = Self::new();
        for p in iter {
            cloud.push(p);
        }
        cloud
    }
}
