use glam::Vec2;

use crate::asset::SlotId;
use crate::input::NavDirection;

/// Detects horizontal single-finger swipes.
///
/// At most one step fires per gesture: once a swipe is recognised the
/// tracker disarms until the next touch starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    /// A single-contact touch began at `position`.
    pub fn begin(&mut self, position: Vec2) {
        self.start = Some(position);
    }

    /// Touch moved. Returns the step to take if this completes a swipe.
    pub fn update(&mut self, position: Vec2, threshold: f32) -> Option<NavDirection> {
        let delta = position - self.start?;
        if delta.x.abs() > threshold && delta.x.abs() > delta.y.abs() {
            self.start = None;
            Some(if delta.x < 0.0 {
                NavDirection::Next
            } else {
                NavDirection::Previous
            })
        } else {
            None
        }
    }

    /// Gesture ended or was cancelled.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Whether a gesture is being tracked.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }
}

/// Step `current` one slot in `direction`, clamped to `[0, count - 1]`.
#[must_use]
pub fn step_selection(current: SlotId, direction: NavDirection, count: usize) -> SlotId {
    let last = count.saturating_sub(1);
    let next = match direction {
        NavDirection::Previous => current.index().saturating_sub(1),
        NavDirection::Next => current.index().saturating_add(1),
    };
    SlotId(next.min(last))
}
