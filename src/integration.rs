//! Integration module for connecting object detection backends with the tracker.
//!
//! Detectors are external collaborators: anything that turns a frame into a
//! list of boxes can implement [`DetectionSource`] and be driven through a
//! [`TrackerPipeline`].

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{PipelineError, TrackerPipeline};
