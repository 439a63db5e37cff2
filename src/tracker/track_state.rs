/// Lifecycle state of a tracked object.
///
/// A freshly registered object starts out `Tracked`; it moves to `Missing`
/// on a missed frame and back to `Tracked` on the next match. `Removed` is
/// terminal and only seen on records handed back at deregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched on the latest frame (or just registered)
    #[default]
    Tracked,
    /// Unmatched for one or more consecutive frames
    Missing,
    /// Removed from tracking
    Removed,
}
