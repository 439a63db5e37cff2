//! Per-object motion models.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::tracker::kalman_filter::{KalmanFilter, KalmanState};
use crate::tracker::rect::Rect;

/// Which motion model new objects get.
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
#[strum(serialize_all = "kebab-case")]
pub enum MotionModelKind {
    /// Keep the last observed box.
    #[default]
    Static,
    /// Kalman filter on the centroid with constant velocity.
    ConstantVelocity,
}

impl MotionModelKind {
    /// Instantiate a model seeded with the first observed box.
    pub fn init(&self, bbox: Rect) -> MotionModel {
        match self {
            MotionModelKind::Static => MotionModel::Static { bbox },
            MotionModelKind::ConstantVelocity => {
                let filter = KalmanFilter::default();
                let (x, y) = bbox.centroid();
                let state = filter.initiate(f64::from(x), f64::from(y));
                MotionModel::ConstantVelocity {
                    filter,
                    state,
                    bbox,
                }
            }
        }
    }
}

/// State predictor owned by a single tracked object.
#[derive(Debug, Clone)]
pub enum MotionModel {
    Static {
        bbox: Rect,
    },
    ConstantVelocity {
        filter: KalmanFilter,
        state: KalmanState,
        /// Last estimate; its size is the last measured size.
        bbox: Rect,
    },
}

impl MotionModel {
    pub fn kind(&self) -> MotionModelKind {
        match self {
            MotionModel::Static { .. } => MotionModelKind::Static,
            MotionModel::ConstantVelocity { .. } => MotionModelKind::ConstantVelocity,
        }
    }

    /// Current box estimate.
    pub fn bbox(&self) -> Rect {
        match self {
            MotionModel::Static { bbox } | MotionModel::ConstantVelocity { bbox, .. } => *bbox,
        }
    }

    /// Advance one frame and return the predicted box.
    pub fn predict(&mut self) -> Rect {
        match self {
            MotionModel::Static { bbox } => *bbox,
            MotionModel::ConstantVelocity {
                filter,
                state,
                bbox,
            } => {
                *state = filter.predict(state);
                *bbox = recenter(bbox, state);
                *bbox
            }
        }
    }

    /// Fuse a measured box and return the refined box.
    pub fn correct(&mut self, measurement: Rect) -> Rect {
        match self {
            MotionModel::Static { bbox } => {
                *bbox = measurement;
                *bbox
            }
            MotionModel::ConstantVelocity {
                filter,
                state,
                bbox,
            } => {
                let (x, y) = measurement.centroid();
                match filter.update(state, f64::from(x), f64::from(y)) {
                    Some(updated) => *state = updated,
                    None => log::warn!(
                        "singular innovation covariance, keeping prior estimate at {:?}",
                        state.position()
                    ),
                }
                *bbox = recenter(&measurement, state);
                *bbox
            }
        }
    }
}

/// `template`'s size centred on the filter position.
fn recenter(template: &Rect, state: &KalmanState) -> Rect {
    let (cx, cy) = state.position();
    Rect::from_center(cx as f32, cy as f32, template.width, template.height)
}
