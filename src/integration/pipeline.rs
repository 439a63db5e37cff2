//! TrackerPipeline for combining detection with tracking.

use thiserror::Error;

use crate::tracker::{MultiObjectTracker, TrackedObject, TrackerConfig, TrackerError};

use super::DetectionSource;

/// Failure of one pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError<E: std::error::Error + 'static> {
    #[error("detection failed: {0}")]
    Detection(#[source] E),
    #[error(transparent)]
    Tracking(#[from] TrackerError),
}

/// Bundles a `DetectionSource` with a `MultiObjectTracker`.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: MultiObjectTracker,
}

impl<D: DetectionSource> TrackerPipeline<D>
where
    D::Error: std::error::Error + 'static,
{
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, TrackerError> {
        Ok(Self {
            detector,
            tracker: MultiObjectTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Result<Self, TrackerError> {
        Self::new(detector, TrackerConfig::default())
    }

    /// Run detection on one frame, feed the result to the tracker and
    /// return the live objects.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedObject>, PipelineError<D::Error>> {
        let detections = self
            .detector
            .detect(input, width, height)
            .map_err(PipelineError::Detection)?;
        Ok(self.tracker.update(detections)?)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &MultiObjectTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut MultiObjectTracker {
        &mut self.tracker
    }
}
