use thiserror::Error;

use crate::tracker::cost::CostMetric;

/// Errors raised while configuring or running a tracker.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error("unknown assignment strategy `{0}`")]
    UnknownStrategy(String),

    #[error("unknown cost metric `{0}`")]
    UnknownCostMetric(String),

    #[error("unknown motion model `{0}`")]
    UnknownMotionModel(String),

    #[error("assignment strategy `{strategy}` cannot be used with the `{metric}` cost metric")]
    IncompatibleConfig { strategy: String, metric: CostMetric },

    #[error("optimal matching threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    #[error("spatial-index matching needs centroid positions, but the cost matrix carries none")]
    MissingCentroids,

    #[error("assignment solver failed: {0}")]
    Assignment(String),
}
