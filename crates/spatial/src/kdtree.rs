use std::cmp::Ordering;
use std::collections::BinaryHeap;

use meshkit_core::{squared_distance, Point3, PointCloud};
use rayon::prelude::*;
use tracing::debug;

use crate::neighbor::Ranked;
use crate::{Neighbor, NeighborResult, SpatialError};

/// Subtrees at least this large are built on separate rayon tasks.
const PARALLEL_BUILD_THRESHOLD: usize = 8192;

#[derive(Debug, Clone, Copy)]
struct KdNode {
    /// Position of the node's point in the indexed cloud.
    index: usize,
    axis: u8,
    split: f32,
}

/// A balanced KD-tree for nearest-neighbor queries on 3D points.
///
/// The tree owns a copy of the points it was built from and is never mutated
/// afterwards, so it can be shared freely across threads for querying.
///
/// Nodes are stored implicitly: the node for the index range `lo..hi` lives at
/// `lo + (hi - lo) / 2`, its left subtree covers `lo..mid` and its right
/// subtree `mid + 1..hi`. Every split is at the exact median, so the depth is
/// `floor(log2(n)) + 1` whatever the input distribution, duplicates and
/// collinear points included.
///
/// Each node splits along the axis of largest spread among the points of its
/// subtree (the lowest axis wins ties). Points in the left subtree have a
/// split-axis coordinate `<=` the node's split value, points in the right
/// subtree `>=`.
///
/// # Non-finite coordinates
///
/// NaN and infinite coordinates are not rejected. Distances are ranked with
/// IEEE `total_cmp`, which places NaN after every number, so a NaN distance
/// never beats a real one. Results are exact for finite input; with NaN in
/// the indexed points or the query, queries still terminate but pruning may
/// skip candidates.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<Point3>,
    nodes: Vec<KdNode>,
}

impl KdTree {
    /// Build a tree over every point of `cloud`.
    ///
    /// An empty cloud produces an empty tree; building never fails, but
    /// queries against an empty tree return [`SpatialError::EmptyIndex`].
    pub fn build(cloud: &PointCloud) -> Self {
        Self::from_vec(cloud.to_points())
    }

    /// Build a tree over a slice of points; indices refer to slice positions.
    pub fn from_points(points: &[Point3]) -> Self {
        Self::from_vec(points.to_vec())
    }

    fn from_vec(points: Vec<Point3>) -> Self {
        let mut nodes: Vec<KdNode> = (0..points.len())
            .map(|index| KdNode {
                index,
                axis: 0,
                split: 0.0,
            })
            .collect();

        build_recursive(&points, &mut nodes);

        let tree = Self { points, nodes };
        debug!(points = tree.len(), depth = tree.depth(), "built kd-tree");
        tree
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of node levels on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        (usize::BITS - self.len().leading_zeros()) as usize
    }

    /// The indexed point at position `index` of the source cloud.
    pub fn point(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }

    /// Find the `k` nearest neighbours to `query`.
    ///
    /// Results are sorted by ascending squared distance; equal distances are
    /// ordered by ascending index. If `k > len()`, every point is returned.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyIndex`] if the tree is empty,
    /// [`SpatialError::InvalidArgument`] if `k == 0`.
    pub fn knn(&self, query: &Point3, k: usize) -> Result<Vec<Neighbor>, SpatialError> {
        self.check_knn(k)?;

        let k = k.min(self.len());
        let mut best = BinaryHeap::with_capacity(k);
        self.search_knn(0, self.nodes.len(), query, k, &mut best);

        Ok(best.into_sorted_vec().into_iter().map(|r| r.0).collect())
    }

    /// The single nearest neighbour of `query`, lowest index on ties.
    pub fn nearest(&self, query: &Point3) -> Result<Neighbor, SpatialError> {
        self.knn(query, 1)?
            .into_iter()
            .next()
            .ok_or(SpatialError::EmptyIndex)
    }

    /// `k`-NN for every point of `queries`, run in parallel.
    ///
    /// The output holds each query's results contiguously, queries in cloud
    /// order, so `min(k, len())` entries per query.
    pub fn knn_batch(
        &self,
        queries: &PointCloud,
        k: usize,
    ) -> Result<Vec<NeighborResult>, SpatialError> {
        self.check_knn(k)?;

        let per_query: Vec<Vec<NeighborResult>> = (0..queries.len())
            .into_par_iter()
            .map(|qi| -> Result<Vec<NeighborResult>, SpatialError> {
                let hits = self.knn(&queries.point(qi), k)?;
                Ok(hits
                    .into_iter()
                    .map(|n| NeighborResult::new(qi, n))
                    .collect())
            })
            .collect::<Result<_, _>>()?;

        Ok(per_query.into_iter().flatten().collect())
    }

    /// 1-NN for every point of `queries`: exactly one result per query.
    pub fn nearest_batch(&self, queries: &PointCloud) -> Result<Vec<NeighborResult>, SpatialError> {
        self.knn_batch(queries, 1)
    }

    /// Find all points within `radius` (Euclidean distance) of `query`.
    ///
    /// Returns indices of points where `dist <= radius`, sorted by index.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyIndex`] if the tree is empty,
    /// [`SpatialError::InvalidArgument`] if `radius` is negative or not finite.
    pub fn radius_search(&self, query: &Point3, radius: f32) -> Result<Vec<usize>, SpatialError> {
        if self.is_empty() {
            return Err(SpatialError::EmptyIndex);
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SpatialError::InvalidArgument(
                "radius must be finite and non-negative",
            ));
        }

        let mut indices = Vec::new();
        self.search_radius(0, self.nodes.len(), query, radius * radius, &mut indices);
        indices.sort_unstable();
        Ok(indices)
    }

    fn check_knn(&self, k: usize) -> Result<(), SpatialError> {
        if self.is_empty() {
            return Err(SpatialError::EmptyIndex);
        }
        if k == 0 {
            return Err(SpatialError::InvalidArgument("k must be at least 1"));
        }
        Ok(())
    }

    fn search_knn(
        &self,
        lo: usize,
        hi: usize,
        query: &Point3,
        k: usize,
        best: &mut BinaryHeap<Ranked>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = self.nodes[mid];

        let index = node.index;
        let candidate = Neighbor {
            index,
            squared_distance: squared_distance(query, &self.points[index]),
        };
        if best.len() < k {
            best.push(Ranked(candidate));
        } else if let Some(mut worst) = best.peek_mut() {
            if candidate.rank(&worst.0) == Ordering::Less {
                *worst = Ranked(candidate);
            }
        }

        let diff = query[node.axis as usize] - node.split;
        let (near, far) = if diff <= 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search_knn(near.0, near.1, query, k, best);

        // Inclusive: a far point at exactly the k-th distance may still win
        // on index.
        let plane = diff * diff;
        let visit_far = best.len() < k
            || best
                .peek()
                .is_some_and(|w| plane.total_cmp(&w.0.squared_distance).is_le());
        if visit_far {
            self.search_knn(far.0, far.1, query, k, best);
        }
    }

    fn search_radius(
        &self,
        lo: usize,
        hi: usize,
        query: &Point3,
        radius_sq: f32,
        out: &mut Vec<usize>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = self.nodes[mid];

        let index = node.index;
        if squared_distance(query, &self.points[index]) <= radius_sq {
            out.push(index);
        }

        let diff = query[node.axis as usize] - node.split;
        let (near, far) = if diff <= 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search_radius(near.0, near.1, query, radius_sq, out);
        if diff * diff <= radius_sq {
            self.search_radius(far.0, far.1, query, radius_sq, out);
        }
    }
}

fn build_recursive(points: &[Point3], nodes: &mut [KdNode]) {
    let len = nodes.len();
    if len == 0 {
        return;
    }

    let axis = widest_axis(points, nodes);
    let mid = len / 2;

    // Index as secondary key makes the median choice a pure function of the
    // input, even with duplicate coordinates.
    nodes.select_nth_unstable_by(mid, |a, b| {
        points[a.index][axis]
            .total_cmp(&points[b.index][axis])
            .then(a.index.cmp(&b.index))
    });

    let median = &mut nodes[mid];
    median.axis = axis as u8;
    median.split = points[median.index][axis];

    let (left, rest) = nodes.split_at_mut(mid);
    let right = &mut rest[1..];
    if len >= PARALLEL_BUILD_THRESHOLD {
        rayon::join(
            || build_recursive(points, left),
            || build_recursive(points, right),
        );
    } else {
        build_recursive(points, left);
        build_recursive(points, right);
    }
}

fn widest_axis(points: &[Point3], nodes: &[KdNode]) -> usize {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for node in nodes {
        let p = &points[node.index];
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }

    let spread = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    let mut best = 0;
    for axis in 1..3 {
        if spread[axis] > spread[best] {
            best = axis;
        }
    }
    best
}
