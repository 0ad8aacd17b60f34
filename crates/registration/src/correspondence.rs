use meshkit_core::PointCloud;
use meshkit_spatial::KdTree;

use crate::RegistrationError;

/// A source point paired with its nearest target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    pub source_index: usize,
    pub target_index: usize,
    pub squared_distance: f32,
}

impl Correspondence {
    pub fn distance(&self) -> f32 {
        self.squared_distance.sqrt()
    }
}

/// Pair every point of `source` with its nearest neighbour in `target_tree`.
///
/// Queries run in parallel. Pairs farther apart than `max_distance` are
/// dropped; the rest are returned in source order. Ties between equally near
/// targets go to the lower target index.
///
/// # Errors
///
/// [`RegistrationError::Spatial`] wrapping
/// [`EmptyIndex`](meshkit_spatial::SpatialError::EmptyIndex) if the target
/// is empty, [`RegistrationError::InvalidArgument`] if `max_distance` is
/// negative or NaN.
pub fn find_correspondences(
    source: &PointCloud,
    target_tree: &KdTree,
    max_distance: f32,
) -> Result<Vec<Correspondence>, RegistrationError> {
    if max_distance.is_nan() || max_distance < 0.0 {
        return Err(RegistrationError::InvalidArgument(
            "max_distance must be non-negative",
        ));
    }
    let max_sq = max_distance * max_distance;

    let hits = target_tree.nearest_batch(source)?;
    Ok(hits
        .into_iter()
        .filter(|h| h.squared_distance <= max_sq)
        .map(|h| Correspondence {
            source_index: h.query_index,
            target_index: h.neighbor_index,
            squared_distance: h.squared_distance,
        })
        .collect())
}

/// Root mean square distance over `correspondences`, `0.0` if there are none.
pub fn rmse(correspondences: &[Correspondence]) -> f32 {
    if correspondences.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = correspondences.iter().map(|c| c.squared_distance).sum();
    (sum_sq / correspondences.len() as f32).sqrt()
}
