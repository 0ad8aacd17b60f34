use crate::Point3;

/// Axis-aligned bounding box.
///
/// Built incrementally from points; non-finite points are skipped so a single
/// NaN vertex cannot poison the box. A box that has seen no finite point is
/// *empty* and reports `min = +inf`, `max = -inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    /// Box spanning the two corners. The corners are reordered per axis so the
    /// `min <= max` invariant holds for any input.
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        let mut aabb = Self::empty();
        aabb.expand_with_point(a);
        aabb.expand_with_point(b);
        aabb
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_with_point(p);
        }
        aabb
    }

    pub fn from_xyz(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let n = x.len().min(y.len()).min(z.len());
        let mut aabb = Self::empty();
        for i in 0..n {
            aabb.expand_with_point([x[i], y[i], z[i]]);
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn expand_with_point(&mut self, point: Point3) {
        if !point.iter().all(|v| v.is_finite()) {
            return;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        match (self.empty, other.empty) {
            (true, _) => other.clone(),
            (_, true) => self.clone(),
            _ => Aabb::from_corners(
                [
                    self.min[0].min(other.min[0]),
                    self.min[1].min(other.min[1]),
                    self.min[2].min(other.min[2]),
                ],
                [
                    self.max[0].max(other.max[0]),
                    self.max[1].max(other.max[1]),
                    self.max[2].max(other.max[2]),
                ],
            ),
        }
    }

    /// Edge lengths per axis. Zero for an empty box.
    pub fn extent(&self) -> [f32; 3] {
        if self.empty {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn max_extent(&self) -> f32 {
        let e = self.extent();
        e[0].max(e[1]).max(e[2])
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point3) -> bool {
        if self.empty || !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb;
    use proptest::prelude::*;

    #[test]
    fn empty_box_has_zero_extent() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.extent(), [0.0; 3]);
        assert_eq!(aabb.max_extent(), 0.0);
        assert!(!aabb.contains(&[0.0, 0.0, 0.0]));
    }

    #[test]
    fn single_point_is_zero_volume() {
        let aabb = Aabb::from_points([[1.0, 2.0, 3.0]]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
        assert_eq!(aabb.extent(), [0.0; 3]);
        assert!(aabb.contains(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn from_corners_reorders_axes() {
        let aabb = Aabb::from_corners([1.0, -1.0, 5.0], [-1.0, 1.0, 0.0]);
        assert_eq!(aabb.min, [-1.0, -1.0, 0.0]);
        assert_eq!(aabb.max, [1.0, 1.0, 5.0]);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let a = Aabb::from_points([[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        assert_eq!(a.union(&Aabb::empty()), a);
        assert_eq!(Aabb::empty().union(&a), a);
    }

    #[test]
    fn union_covers_both() {
        let a = Aabb::from_points([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        let b = Aabb::from_points([[-2.0, 0.5, 0.5], [0.5, 4.0, 0.5]]);
        let u = a.union(&b);
        assert_eq!(u.min, [-2.0, 0.0, 0.0]);
        assert_eq!(u.max, [1.0, 4.0, 1.0]);
        assert_eq!(u.max_extent(), 4.0);
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let aabb = Aabb::from_points([[f32::NAN, 0.0, 0.0], [1.0, 1.0, 1.0], [f32::INFINITY, 0.0, 0.0]]);
        assert_eq!(aabb.min, [1.0, 1.0, 1.0]);
        assert_eq!(aabb.max, [1.0, 1.0, 1.0]);
    }

    proptest! {
        #[test]
        fn min_never_exceeds_max(
            pts in prop::collection::vec((-1e3f32..1e3f32, -1e3f32..1e3f32, -1e3f32..1e3f32), 1..300)
        ) {
            let aabb = Aabb::from_points(pts.iter().map(|p| [p.0, p.1, p.2]));
            for axis in 0..3 {
                prop_assert!(aabb.min[axis] <= aabb.max[axis]);
            }
            for p in &pts {
                prop_assert!(aabb.contains(&[p.0, p.1, p.2]));
            }
        }
    }
}
