//! Cost matrices between tracked boxes (rows) and new detections (columns).

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::tracker::rect::{Centroid, Rect};

/// Pairwise dissimilarity used to compare tracked boxes with detections.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum CostMetric {
    /// Euclidean distance between integer centroids.
    #[default]
    #[serde(alias = "euclidean-centroid")]
    #[strum(to_string = "euclidean", serialize = "euclidean-centroid")]
    Euclidean,
    /// `1 - IoU`; non-overlapping pairs cost exactly `1.0`.
    #[strum(to_string = "iou")]
    Iou,
}

impl CostMetric {
    /// Build the `tracked.len() x detected.len()` cost matrix for this metric.
    pub fn build(&self, tracked: &[Rect], detected: &[Rect]) -> CostMatrix {
        match self {
            CostMetric::Euclidean => euclidean_distance(tracked, detected),
            CostMetric::Iou => iou_distance(tracked, detected),
        }
    }
}

/// Centroids the Euclidean matrix was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CentroidSets {
    pub tracked: Vec<Centroid>,
    pub detected: Vec<Centroid>,
}

/// A frame's cost matrix. Rows are tracked objects, columns are detections.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    values: Array2<f64>,
    centroids: Option<CentroidSets>,
}

impl CostMatrix {
    /// Wrap raw costs. Strategies that need positions will reject it.
    pub fn from_values(values: Array2<f64>) -> Self {
        Self {
            values,
            centroids: None,
        }
    }

    /// Wrap costs computed from the given centroids.
    pub fn with_centroids(values: Array2<f64>, centroids: CentroidSets) -> Self {
        debug_assert_eq!(
            values.dim(),
            (centroids.tracked.len(), centroids.detected.len())
        );
        Self {
            values,
            centroids: Some(centroids),
        }
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn centroids(&self) -> Option<&CentroidSets> {
        self.centroids.as_ref()
    }

    /// `(tracked, detected)`.
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// True when either side has no boxes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Array2<f64>> for CostMatrix {
    fn from(values: Array2<f64>) -> Self {
        Self::from_values(values)
    }
}

/// Compute the centroid distance matrix between tracks and detections.
pub fn euclidean_distance(track_boxes: &[Rect], det_boxes: &[Rect]) -> CostMatrix {
    let tracked: Vec<Centroid> = track_boxes.iter().map(Rect::centroid).collect();
    let detected: Vec<Centroid> = det_boxes.iter().map(Rect::centroid).collect();

    let mut dists = Array2::zeros((tracked.len(), detected.len()));
    for (i, &(tx, ty)) in tracked.iter().enumerate() {
        for (j, &(dx, dy)) in detected.iter().enumerate() {
            let ddx = f64::from(tx) - f64::from(dx);
            let ddy = f64::from(ty) - f64::from(dy);
            dists[[i, j]] = ddx.hypot(ddy);
        }
    }
    CostMatrix::with_centroids(dists, CentroidSets { tracked, detected })
}

/// Compute IoU distance matrix between tracks and detections.
pub fn iou_distance(track_boxes: &[Rect], det_boxes: &[Rect]) -> CostMatrix {
    let mut dists = Array2::zeros((track_boxes.len(), det_boxes.len()));
    for (i, t) in track_boxes.iter().enumerate() {
        for (j, d) in det_boxes.iter().enumerate() {
            dists[[i, j]] = 1.0 - f64::from(t.iou(d));
        }
    }
    CostMatrix::from_values(dists)
}
