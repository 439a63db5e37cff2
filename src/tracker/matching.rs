//! Matching utilities for multi-object tracking.
//!
//! Every strategy consumes a [`CostMatrix`] (rows = tracked objects,
//! columns = detections) and produces an [`Assignment`] from detection
//! index to tracked index. Indices absent from the assignment are
//! unmatched.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::tracker::cost::{CostMatrix, CostMetric};
use crate::tracker::error::TrackerError;
use crate::tracker::kdtree::KdTree;
use crate::tracker::rect::Rect;

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box
    pub bbox: Rect,
    /// Detection confidence score, if the detector reports one
    pub score: Option<f32>,
    /// Class label, if the detector reports one
    pub class_id: Option<u32>,
}

impl Detection {
    /// Create a detection from TLBR corners (x1, y1, x2, y2).
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::from_rect(Rect::from_tlbr(x1, y1, x2, y2))
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self {
            bbox,
            score: None,
            class_id: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_class(mut self, class_id: u32) -> Self {
        self.class_id = Some(class_id);
        self
    }
}

impl From<Rect> for Detection {
    fn from(bbox: Rect) -> Self {
        Self::from_rect(bbox)
    }
}

/// Detection index -> tracked index. Injective in both directions.
pub type Assignment = BTreeMap<usize, usize>;

/// How detections are matched to tracked objects each frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AssignmentStrategy {
    /// Nearest neighbour per tracked row, cheapest rows first.
    #[default]
    Greedy,
    /// Nearest tracked centroid per detection through a k-d tree.
    /// Only valid with [`CostMetric::Euclidean`].
    SpatialIndex,
    /// Minimum total cost matching on a matrix padded with `threshold`.
    Optimal {
        /// Value of the slack row and column added to the matrix. Lower
        /// values leave more real pairs unmatched.
        #[serde(default)]
        threshold: f64,
    },
}

impl AssignmentStrategy {
    pub fn optimal(threshold: f64) -> Self {
        AssignmentStrategy::Optimal { threshold }
    }

    /// Check the strategy's parameters and that it accepts `metric`.
    pub fn validate(&self, metric: CostMetric) -> Result<(), TrackerError> {
        match *self {
            AssignmentStrategy::SpatialIndex if metric != CostMetric::Euclidean => {
                Err(TrackerError::IncompatibleConfig {
                    strategy: self.to_string(),
                    metric,
                })
            }
            AssignmentStrategy::Optimal { threshold } if !threshold.is_finite() => {
                Err(TrackerError::InvalidThreshold(threshold))
            }
            _ => Ok(()),
        }
    }

    pub fn assign(&self, costs: &CostMatrix) -> Result<Assignment, TrackerError> {
        match *self {
            AssignmentStrategy::Greedy => Ok(greedy_assignment(costs.values())),
            AssignmentStrategy::SpatialIndex => spatial_assignment(costs),
            AssignmentStrategy::Optimal { threshold } => {
                linear_assignment(costs.values(), threshold)
            }
        }
    }
}

/// Greedy nearest-neighbour matching.
///
/// Each row proposes its cheapest column; rows are visited by ascending
/// proposal cost (ties by row order) and a proposal is kept only if its
/// column is still free. A row whose proposal is taken stays unmatched.
pub fn greedy_assignment(cost_matrix: &Array2<f64>) -> Assignment {
    let mut proposals: Vec<(usize, usize, f64)> = cost_matrix
        .rows()
        .into_iter()
        .enumerate()
        .filter_map(|(row, costs)| {
            costs
                .iter()
                .enumerate()
                .reduce(|best, cur| if cur.1 < best.1 { cur } else { best })
                .map(|(col, &cost)| (row, col, cost))
        })
        .collect();
    proposals.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut used_cols = vec![false; cost_matrix.ncols()];
    let mut assignment = Assignment::new();
    for (row, col, _) in proposals {
        if used_cols[col] {
            continue;
        }
        used_cols[col] = true;
        assignment.insert(col, row);
    }
    assignment
}

/// Nearest-neighbour matching over tracked centroids.
///
/// Detections are processed in input order; a detection whose nearest
/// tracked centroid is already claimed falls back to the next nearest free
/// one, and stays unmatched when none is left.
pub fn spatial_assignment(costs: &CostMatrix) -> Result<Assignment, TrackerError> {
    let centroids = costs.centroids().ok_or(TrackerError::MissingCentroids)?;
    let mut assignment = Assignment::new();
    if centroids.tracked.is_empty() || centroids.detected.is_empty() {
        return Ok(assignment);
    }

    let tree = KdTree::build(&centroids.tracked);
    let mut claimed = vec![false; tree.len()];

    for (det_idx, &point) in centroids.detected.iter().enumerate() {
        let free = match tree.nearest(point) {
            Some(nearest) if !claimed[nearest] => Some(nearest),
            Some(_) => tree
                .k_nearest(point, tree.len())
                .into_iter()
                .skip(1)
                .find(|&candidate| !claimed[candidate]),
            None => None,
        };
        if let Some(track_idx) = free {
            claimed[track_idx] = true;
            assignment.insert(det_idx, track_idx);
        }
    }
    Ok(assignment)
}

/// Exact minimum-cost matching.
///
/// The matrix is padded to `max(rows, cols) + 1` square with `thresh`, solved
/// with LAPJV, and pairs touching a padding row or column are dropped.
pub fn linear_assignment(cost_matrix: &Array2<f64>, thresh: f64) -> Result<Assignment, TrackerError> {
    let (num_rows, num_cols) = cost_matrix.dim();
    if num_rows == 0 || num_cols == 0 {
        return Ok(Assignment::new());
    }

    let size = num_rows.max(num_cols) + 1;
    let mut padded = Array2::<f64>::from_elem((size, size), thresh);
    padded
        .slice_mut(ndarray::s![..num_rows, ..num_cols])
        .assign(cost_matrix);

    let (row_to_col, _) =
        lapjv::lapjv(&padded).map_err(|e| TrackerError::Assignment(format!("{e:?}")))?;

    Ok(row_to_col
        .into_iter()
        .enumerate()
        .filter(|&(row, col)| row < num_rows && col < num_cols)
        .map(|(row, col)| (col, row))
        .collect())
}
