use ndarray::array;
use objtrack_rs::tracker::{Assignment, CostMatrix, Detection, MotionModelKind, Rect};
use objtrack_rs::AssignmentStrategy;

fn assign(strategy: AssignmentStrategy, costs: ndarray::Array2<f64>) -> Assignment {
    strategy.assign(&CostMatrix::from_values(costs)).unwrap()
}

#[test]
fn test_padding_never_leaks() {
    let assignment = assign(
        AssignmentStrategy::optimal(0.0),
        array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
    );
    assert_eq!(assignment, Assignment::from([(0, 0)]));
}

#[test]
fn test_greedy_and_optimal_diverge() {
    let costs = array![[1.0, 20.0], [30.0, 40.0]];
    assert_eq!(
        assign(AssignmentStrategy::Greedy, costs.clone()),
        Assignment::from([(0, 0)])
    );
    assert_eq!(
        assign(AssignmentStrategy::optimal(100.0), costs),
        Assignment::from([(0, 0), (1, 1)])
    );
}

#[test]
fn test_padding_value_controls_eagerness() {
    // One pair costs 5; with slack 2 it is cheaper to leave both unmatched.
    let costs = array![[5.0]];
    assert!(assign(AssignmentStrategy::optimal(2.0), costs.clone()).is_empty());
    assert_eq!(
        assign(AssignmentStrategy::optimal(10.0), costs),
        Assignment::from([(0, 0)])
    );
}

#[test]
fn test_static_model_round_trip() {
    let bbox = Rect::from_tlbr(3.0, 4.0, 17.0, 40.0);
    let mut model = MotionModelKind::Static.init(bbox);
    model.predict();
    assert_eq!(model.correct(bbox), bbox);
    assert_eq!(Detection::from(bbox).bbox, bbox);
}
