mod cost;
mod error;
mod kalman_filter;
mod kdtree;
mod matching;
mod motion;
mod multi_tracker;
mod rect;
mod track_state;
mod tracked_object;

pub use cost::{CentroidSets, CostMatrix, CostMetric, euclidean_distance, iou_distance};
pub use error::TrackerError;
pub use kalman_filter::{KalmanFilter, KalmanState};
pub use kdtree::KdTree;
pub use matching::{
    Assignment, AssignmentStrategy, Detection, greedy_assignment, linear_assignment,
    spatial_assignment,
};
pub use motion::{MotionModel, MotionModelKind};
pub use multi_tracker::{MultiObjectTracker, TrackerConfig};
pub use rect::{Centroid, Rect, centroid, iou};
pub use track_state::TrackState;
pub use tracked_object::TrackedObject;
