//! Multi-object tracker: per-frame association and object lifecycle.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tracker::cost::CostMetric;
use crate::tracker::error::TrackerError;
use crate::tracker::matching::{AssignmentStrategy, Detection};
use crate::tracker::motion::MotionModelKind;
use crate::tracker::rect::{Centroid, Rect};
use crate::tracker::tracked_object::TrackedObject;

/// Configuration for the [`MultiObjectTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive missed frames an object survives before deregistration
    pub max_missing_frames: u32,
    pub assignment: AssignmentStrategy,
    pub cost_metric: CostMetric,
    pub motion_model: MotionModelKind,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_missing_frames: 3,
            assignment: AssignmentStrategy::Greedy,
            cost_metric: CostMetric::Euclidean,
            motion_model: MotionModelKind::Static,
        }
    }
}

impl TrackerConfig {
    /// Build a config from option names such as `"optimal"`, `"iou"` and
    /// `"constant-velocity"`.
    pub fn from_names(
        assignment: &str,
        cost_metric: &str,
        motion_model: &str,
        max_missing_frames: u32,
    ) -> Result<Self, TrackerError> {
        let config = Self {
            max_missing_frames,
            assignment: AssignmentStrategy::from_str(assignment)
                .map_err(|_| TrackerError::UnknownStrategy(assignment.to_owned()))?,
            cost_metric: CostMetric::from_str(cost_metric)
                .map_err(|_| TrackerError::UnknownCostMetric(cost_metric.to_owned()))?,
            motion_model: MotionModelKind::from_str(motion_model)
                .map_err(|_| TrackerError::UnknownMotionModel(motion_model.to_owned()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_missing_frames(mut self, max_missing_frames: u32) -> Self {
        self.max_missing_frames = max_missing_frames;
        self
    }

    pub fn with_assignment(mut self, assignment: AssignmentStrategy) -> Self {
        self.assignment = assignment;
        self
    }

    pub fn with_cost_metric(mut self, cost_metric: CostMetric) -> Self {
        self.cost_metric = cost_metric;
        self
    }

    pub fn with_motion_model(mut self, motion_model: MotionModelKind) -> Self {
        self.motion_model = motion_model;
        self
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        self.assignment.validate(self.cost_metric)
    }
}

/// Tracks objects across frames of independent detections.
///
/// Live records are keyed by identity; `live` keeps the identities of
/// current objects in registration order, which is also the row order of
/// every cost matrix. Identities are never reused.
#[derive(Debug, Clone)]
pub struct MultiObjectTracker {
    config: TrackerConfig,
    records: BTreeMap<u64, TrackedObject>,
    live: Vec<u64>,
    last_deregistered: Vec<TrackedObject>,
    next_id: u64,
    frame_id: u64,
}

impl MultiObjectTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            config,
            records: BTreeMap::new(),
            live: Vec::new(),
            last_deregistered: Vec::new(),
            next_id: 0,
            frame_id: 0,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Process one frame of detections and return the live objects.
    pub fn update(&mut self, detections: Vec<Detection>) -> Result<Vec<TrackedObject>, TrackerError> {
        self.frame_id += 1;
        self.last_deregistered.clear();

        if detections.is_empty() {
            let live = self.live.clone();
            self.handle_missing(&live);
        } else if self.live.is_empty() {
            for det in &detections {
                self.register(det);
            }
        } else {
            self.associate(&detections)?;
        }

        Ok(self.objects().cloned().collect())
    }

    fn associate(&mut self, detections: &[Detection]) -> Result<(), TrackerError> {
        let live = self.live.clone();

        let mut predicted = Vec::with_capacity(live.len());
        for &id in &live {
            if let Some(obj) = self.object_mut(id) {
                predicted.push(obj.predict());
            }
        }
        let det_rects: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();

        let costs = self.config.cost_metric.build(&predicted, &det_rects);
        let assignment = self.config.assignment.assign(&costs)?;
        log::trace!(
            "frame {}: {}x{} cost matrix, {} matches",
            self.frame_id,
            live.len(),
            detections.len(),
            assignment.len()
        );

        let frame_id = self.frame_id;
        let mut matched_rows = vec![false; live.len()];
        let mut matched_dets = vec![false; detections.len()];
        for (&det_idx, &row) in &assignment {
            if let Some(obj) = self.object_mut(live[row]) {
                obj.update(&detections[det_idx], frame_id);
            }
            matched_rows[row] = true;
            matched_dets[det_idx] = true;
        }

        let missing: Vec<u64> = live
            .iter()
            .zip(&matched_rows)
            .filter(|&(_, &matched)| !matched)
            .map(|(&id, _)| id)
            .collect();
        self.handle_missing(&missing);

        for (det, _) in detections.iter().zip(&matched_dets).filter(|&(_, &m)| !m) {
            self.register(det);
        }
        Ok(())
    }

    /// Age every object in `ids` by one frame, deregistering the expired.
    fn handle_missing(&mut self, ids: &[u64]) {
        let max_missing_frames = self.config.max_missing_frames;
        let mut expired = Vec::new();
        for &id in ids {
            if let Some(obj) = self.object_mut(id) {
                if obj.mark_missed(max_missing_frames) {
                    expired.push(id);
                }
            }
        }
        for id in expired {
            self.deregister(id);
        }
    }

    fn register(&mut self, detection: &Detection) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let obj = TrackedObject::new(id, detection, self.config.motion_model, self.frame_id);
        log::debug!("register object {} at {:?}", id, obj.rect());
        self.records.insert(id, obj);
        self.live.push(id);
        id
    }

    fn deregister(&mut self, id: u64) {
        let Some(mut obj) = self.records.remove(&id) else {
            return;
        };
        obj.mark_removed();
        self.live.retain(|&live_id| live_id != id);
        log::debug!(
            "deregister object {} after {} missed frames",
            id,
            obj.missed_frames
        );
        self.last_deregistered.push(obj);
    }

    fn object_mut(&mut self, id: u64) -> Option<&mut TrackedObject> {
        self.records.get_mut(&id)
    }

    pub fn get(&self, id: u64) -> Option<&TrackedObject> {
        self.records.get(&id)
    }

    /// Live objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> + '_ {
        self.live.iter().filter_map(|&id| self.get(id))
    }

    /// Identities of live objects in registration order.
    pub fn ids(&self) -> &[u64] {
        &self.live
    }

    /// Current box of every live object.
    pub fn boxes(&self) -> BTreeMap<u64, Rect> {
        self.objects().map(|o| (o.track_id, o.rect())).collect()
    }

    /// Current integer centroid of every live object.
    pub fn centroids(&self) -> BTreeMap<u64, Centroid> {
        self.objects().map(|o| (o.track_id, o.centroid())).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Records retired by the most recent `update`, in `Removed` state.
    pub fn last_deregistered(&self) -> &[TrackedObject] {
        &self.last_deregistered
    }

    /// Number of `update` calls so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_id
    }
}
