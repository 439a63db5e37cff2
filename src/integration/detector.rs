//! Trait for object detection inference backends.

use crate::tracker::{Detection, Rect};

/// Trait for object detection inference backends.
///
/// Implement this trait to feed any detection model into the tracker.
///
/// # Example
///
/// ```ignore
/// use objtrack_rs::{DetectionSource, Detection};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on raw image data and return this frame's detections.
    ///
    /// The order of the returned detections carries no meaning across
    /// frames.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<Rect> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from_rect).collect()
    }
}

/// TLBR corner tuples, `(x1, y1, x2, y2)`.
impl IntoDetections for Vec<(f32, f32, f32, f32)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(x1, y1, x2, y2)| Detection::new(x1, y1, x2, y2))
            .collect()
    }
}
