//! A single tracked object and its per-object motion state.

use crate::tracker::matching::Detection;
use crate::tracker::motion::{MotionModel, MotionModelKind};
use crate::tracker::rect::{Centroid, Rect};
use crate::tracker::track_state::TrackState;

#[derive(Debug, Clone)]
pub struct TrackedObject {
    /// Identity, unique within the owning tracker
    pub track_id: u64,
    /// Current lifecycle state
    pub state: TrackState,
    /// Consecutive frames without a matching detection
    pub missed_frames: u32,
    /// Score of the last matched detection
    pub score: Option<f32>,
    /// Class of the last matched detection
    pub class_id: Option<u32>,
    /// Frame the object was registered on
    pub start_frame: u64,
    /// Frame of the last matched detection
    pub frame_id: u64,
    motion: MotionModel,
}

impl TrackedObject {
    /// Register a detection under `track_id`.
    pub fn new(track_id: u64, detection: &Detection, kind: MotionModelKind, frame_id: u64) -> Self {
        Self {
            track_id,
            state: TrackState::Tracked,
            missed_frames: 0,
            score: detection.score,
            class_id: detection.class_id,
            start_frame: frame_id,
            frame_id,
            motion: kind.init(detection.bbox),
        }
    }

    /// Current box estimate.
    pub fn rect(&self) -> Rect {
        self.motion.bbox()
    }

    pub fn centroid(&self) -> Centroid {
        self.rect().centroid()
    }

    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }

    /// Frames since the object was registered.
    pub fn age(&self) -> u64 {
        self.frame_id - self.start_frame
    }

    pub fn predict(&mut self) -> Rect {
        self.motion.predict()
    }

    /// Refresh from a matched detection.
    pub fn update(&mut self, detection: &Detection, frame_id: u64) {
        self.motion.correct(detection.bbox);
        self.missed_frames = 0;
        self.state = TrackState::Tracked;
        self.frame_id = frame_id;
        self.score = detection.score;
        self.class_id = detection.class_id;
    }

    /// Count a missed frame. Returns true once more than `max_missing_frames`
    /// consecutive frames have been missed.
    pub fn mark_missed(&mut self, max_missing_frames: u32) -> bool {
        self.missed_frames += 1;
        self.state = TrackState::Missing;
        self.missed_frames > max_missing_frames
    }

    pub fn mark_removed(&mut self) {
        self.state = TrackState::Removed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missed_frames_threshold() {
        let det = Detection::new(0.0, 0.0, 10.0, 10.0);
        let mut obj = TrackedObject::new(7, &det, MotionModelKind::Static, 1);
        assert_eq!(obj.state, TrackState::Tracked);

        assert!(!obj.mark_missed(2));
        assert!(!obj.mark_missed(2));
        assert_eq!(obj.state, TrackState::Missing);
        assert!(obj.mark_missed(2));
    }

    #[test]
    fn test_update_resets_counter() {
        let det = Detection::new(0.0, 0.0, 10.0, 10.0).with_score(0.4);
        let mut obj = TrackedObject::new(0, &det, MotionModelKind::Static, 1);
        obj.mark_missed(3);

        let next = Detection::new(2.0, 0.0, 12.0, 10.0).with_score(0.9).with_class(3);
        obj.update(&next, 3);
        assert_eq!(obj.missed_frames, 0);
        assert_eq!(obj.state, TrackState::Tracked);
        assert_eq!(obj.rect(), next.bbox);
        assert_eq!(obj.centroid(), (7, 5));
        assert_eq!(obj.score, Some(0.9));
        assert_eq!(obj.class_id, Some(3));
        assert_eq!(obj.age(), 2);
        assert_eq!(obj.motion().kind(), MotionModelKind::Static);
    }
}
