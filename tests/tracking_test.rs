use std::collections::BTreeMap;

use objtrack_rs::tracker::{Detection, Rect};
use objtrack_rs::{
    AssignmentStrategy, CostMetric, MotionModelKind, MultiObjectTracker, TrackState,
    TrackerConfig, TrackerError,
};
use rand::Rng;

const N_OBJECTS: usize = 10;

/// `N_OBJECTS` 10x10 boxes stacked vertically, all moving one pixel right
/// per frame.
fn perfect_move(frame: usize) -> Vec<Detection> {
    (0..N_OBJECTS)
        .map(|i| {
            let x = frame as f32;
            let y = 20.0 * i as f32;
            Detection::new(x, y, x + 10.0, y + 10.0)
        })
        .collect()
}

fn configs() -> Vec<TrackerConfig> {
    let mut configs = Vec::new();
    for motion in [MotionModelKind::Static, MotionModelKind::ConstantVelocity] {
        for (assignment, metric) in [
            (AssignmentStrategy::Greedy, CostMetric::Euclidean),
            (AssignmentStrategy::SpatialIndex, CostMetric::Euclidean),
            (AssignmentStrategy::optimal(1000.0), CostMetric::Euclidean),
            (AssignmentStrategy::Greedy, CostMetric::Iou),
            (AssignmentStrategy::optimal(1.0), CostMetric::Iou),
        ] {
            configs.push(
                TrackerConfig::default()
                    .with_assignment(assignment)
                    .with_cost_metric(metric)
                    .with_motion_model(motion),
            );
        }
    }
    configs
}

#[test]
fn test_identity_stable_under_translation() {
    for config in configs() {
        let mut tracker = MultiObjectTracker::new(config.clone()).unwrap();
        tracker.update(perfect_move(0)).unwrap();
        let initial: BTreeMap<u64, i32> = tracker
            .centroids()
            .into_iter()
            .map(|(id, (_, y))| (id, y))
            .collect();
        assert_eq!(initial.len(), N_OBJECTS);

        for frame in 1..60 {
            let objects = tracker.update(perfect_move(frame)).unwrap();
            assert_eq!(objects.len(), N_OBJECTS, "{config:?} frame {frame}");
            for (id, (_, y)) in tracker.centroids() {
                assert_eq!(Some(&y), initial.get(&id), "{config:?} frame {frame}");
            }
        }
        assert!(tracker.ids().iter().all(|id| (*id as usize) < N_OBJECTS));
    }
}

#[test]
fn test_deregistration_threshold() {
    let config = TrackerConfig::default().with_max_missing_frames(3);
    let mut tracker = MultiObjectTracker::new(config).unwrap();
    tracker.update(vec![Detection::new(0.0, 0.0, 10.0, 10.0)]).unwrap();

    for missed in 1..=3 {
        tracker.update(vec![]).unwrap();
        assert_eq!(tracker.len(), 1, "after {missed} misses");
        assert_eq!(tracker.get(0).unwrap().missed_frames, missed);
    }

    tracker.update(vec![]).unwrap();
    assert!(tracker.is_empty());
    let retired = tracker.last_deregistered();
    assert_eq!(retired.len(), 1);
    assert_eq!(retired[0].track_id, 0);
    assert_eq!(retired[0].state, TrackState::Removed);
    assert_eq!(retired[0].missed_frames, 4);
}

#[test]
fn test_deregistration_while_others_match() {
    let config = TrackerConfig::default().with_max_missing_frames(2);
    let mut tracker = MultiObjectTracker::new(config).unwrap();
    let stays = Detection::new(0.0, 0.0, 10.0, 10.0);
    let leaves = Detection::new(200.0, 200.0, 210.0, 210.0);
    tracker.update(vec![stays.clone(), leaves]).unwrap();

    tracker.update(vec![stays.clone()]).unwrap();
    tracker.update(vec![stays.clone()]).unwrap();
    assert_eq!(tracker.ids(), &[0, 1]);

    tracker.update(vec![stays]).unwrap();
    assert_eq!(tracker.ids(), &[0]);
    let retired: Vec<u64> = tracker.last_deregistered().iter().map(|o| o.track_id).collect();
    assert_eq!(retired, vec![1]);
    assert_eq!(tracker.last_deregistered()[0].rect(), Rect::from_tlbr(200.0, 200.0, 210.0, 210.0));
}

#[test]
fn test_below_missing_frames() {
    // Past 8 frames of drift the IoU configs lose all overlap.
    let max_missing_frames = rand::thread_rng().gen_range(1..=8);
    for config in configs() {
        let config = config.with_max_missing_frames(max_missing_frames);
        let mut tracker = MultiObjectTracker::new(config).unwrap();
        for frame in 0..100 {
            let detections = if frame % max_missing_frames as usize != 0 {
                vec![]
            } else {
                perfect_move(frame)
            };
            tracker.update(detections).unwrap();
            assert_eq!(tracker.len(), N_OBJECTS);
        }
    }
}

#[test]
fn test_over_missing_frames() {
    let max_missing_frames = rand::thread_rng().gen_range(1..=10);
    let mut tracker =
        MultiObjectTracker::new(TrackerConfig::default().with_max_missing_frames(max_missing_frames))
            .unwrap();

    let mut missing = 0;
    for frame in 0..100 {
        let detections = if frame % (max_missing_frames as usize + 2) != 0 {
            missing += 1;
            vec![]
        } else {
            missing = 0;
            perfect_move(frame)
        };
        tracker.update(detections).unwrap();
        if missing > max_missing_frames {
            assert!(tracker.is_empty());
        } else {
            assert_eq!(tracker.len(), N_OBJECTS);
        }
    }
}

#[test]
fn test_empty_input_idempotence() {
    let mut tracker = MultiObjectTracker::new(TrackerConfig::default()).unwrap();
    for _ in 0..10 {
        let objects = tracker.update(vec![]).unwrap();
        assert!(objects.is_empty());
        assert!(tracker.is_empty());
        assert!(tracker.last_deregistered().is_empty());
    }
    assert_eq!(tracker.frame_count(), 10);
}

#[test]
fn test_new_objects_get_fresh_ids() {
    let mut tracker = MultiObjectTracker::new(TrackerConfig::default()).unwrap();
    tracker.update(perfect_move(0)).unwrap();

    let mut detections = perfect_move(1);
    detections.push(Detection::new(500.0, 500.0, 510.0, 510.0));
    tracker.update(detections).unwrap();

    assert_eq!(tracker.len(), N_OBJECTS + 1);
    let newest = tracker.get(N_OBJECTS as u64).unwrap();
    assert_eq!(newest.rect(), Rect::from_tlbr(500.0, 500.0, 510.0, 510.0));
}

#[test]
fn test_config_from_json() {
    let config: TrackerConfig = serde_json::from_str(
        r#"{
            "max_missing_frames": 5,
            "assignment": {"optimal": {"threshold": 40.0}},
            "cost_metric": "iou",
            "motion_model": "constant-velocity"
        }"#,
    )
    .unwrap();
    assert_eq!(config.max_missing_frames, 5);
    assert_eq!(config.assignment, AssignmentStrategy::optimal(40.0));
    assert_eq!(config.cost_metric, CostMetric::Iou);
    assert_eq!(config.motion_model, MotionModelKind::ConstantVelocity);

    let defaults: TrackerConfig = serde_json::from_str(r#"{"assignment": "spatial-index"}"#).unwrap();
    assert_eq!(defaults.assignment, AssignmentStrategy::SpatialIndex);
    assert_eq!(defaults.max_missing_frames, 3);

    let json = serde_json::to_string(&config).unwrap();
    let back: TrackerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    assert!(serde_json::from_str::<TrackerConfig>(r#"{"assignment": "hungarian"}"#).is_err());
}

#[test]
fn test_incompatible_config_refused() {
    let config: TrackerConfig =
        serde_json::from_str(r#"{"assignment": "spatial-index", "cost_metric": "iou"}"#).unwrap();
    match MultiObjectTracker::new(config) {
        Err(TrackerError::IncompatibleConfig { strategy, metric }) => {
            assert_eq!(strategy, "spatial-index");
            assert_eq!(metric, CostMetric::Iou);
        }
        other => panic!("expected IncompatibleConfig, got {other:?}"),
    }
}
