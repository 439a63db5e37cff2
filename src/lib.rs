//! Multi-object tracking over per-frame detections.
//!
//! The [`MultiObjectTracker`] keeps stable identities for boxes coming out of
//! a detector. Each frame it builds a cost matrix ([`CostMetric`]), matches
//! detections to live objects ([`AssignmentStrategy`]), refreshes matched
//! objects through their [`MotionModel`] and ages out objects that go
//! missing for more than `max_missing_frames` frames.
//!
//! ```
//! use objtrack_rs::{AssignmentStrategy, Detection, MultiObjectTracker, TrackerConfig};
//!
//! let config = TrackerConfig::default().with_assignment(AssignmentStrategy::optimal(100.0));
//! let mut tracker = MultiObjectTracker::new(config)?;
//!
//! tracker.update(vec![Detection::new(0.0, 0.0, 10.0, 10.0)])?;
//! let objects = tracker.update(vec![Detection::new(2.0, 0.0, 12.0, 10.0)])?;
//! assert_eq!(objects.len(), 1);
//! assert_eq!(objects[0].track_id, 0);
//! # Ok::<(), objtrack_rs::TrackerError>(())
//! ```

pub mod integration;
pub mod tracker;

pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, PipelineError, TrackerPipeline};
pub use tracker::{
    AssignmentStrategy, CostMetric, Detection, MotionModel, MotionModelKind, MultiObjectTracker,
    Rect, TrackState, TrackedObject, TrackerConfig, TrackerError,
};
