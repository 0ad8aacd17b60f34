use std::cmp::Ordering;

/// One hit of a single-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the point in the indexed cloud.
    pub index: usize,
    pub squared_distance: f32,
}

impl Neighbor {
    pub fn distance(&self) -> f32 {
        self.squared_distance.sqrt()
    }

    /// Total order used for ranking: squared distance first (IEEE
    /// `total_cmp`, so NaN sorts after every number), then lower index.
    pub(crate) fn rank(&self, other: &Self) -> Ordering {
        self.squared_distance
            .total_cmp(&other.squared_distance)
            .then(self.index.cmp(&other.index))
    }
}

// Ordering wrapper so `BinaryHeap` keeps the worst candidate on top.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Ranked(pub Neighbor);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank(&other.0)
    }
}

/// One hit of a batch query, tagged with the query's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborResult {
    pub query_index: usize,
    pub neighbor_index: usize,
    pub squared_distance: f32,
}

impl NeighborResult {
    pub(crate) fn new(query_index: usize, n: Neighbor) -> Self {
        Self {
            query_index,
            neighbor_index: n.index,
            squared_distance: n.squared_distance,
        }
    }

    pub fn distance(&self) -> f32 {
        self.squared_distance.sqrt()
    }
}
