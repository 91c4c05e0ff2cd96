use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::swipe::SwipeTracker;
use crate::animation::TargetRotation;
use crate::asset::SlotId;
use crate::input::{NavDirection, PointerKind};
use crate::options::InteractionOptions;

/// One pointer-down-to-pointer-up gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Model under the pointer at gesture start, if any.
    pub selected: Option<SlotId>,
    /// Last pointer position.
    pub last: Vec2,
}

/// Pointer travel to apply to a selected model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    /// Model being rotated.
    pub slot: SlotId,
    /// Travel since the previous move, logical pixels.
    pub delta: Vec2,
}

/// What a pointer move asked for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveOutcome {
    /// Rotation to apply.
    pub drag: Option<DragDelta>,
    /// Selection step from a swipe.
    pub navigate: Option<NavDirection>,
}

/// Gesture state machine: `Idle → Dragging → Idle`.
#[derive(Debug, Clone)]
pub struct InteractionController {
    options: InteractionOptions,
    drag: Option<DragSession>,
    swipe: SwipeTracker,
}

impl InteractionController {
    /// Idle controller.
    #[must_use]
    pub fn new(options: InteractionOptions) -> Self {
        Self {
            options,
            drag: None,
            swipe: SwipeTracker::default(),
        }
    }

    /// Live gesture, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Model currently held by the pointer.
    #[must_use]
    pub fn dragged_slot(&self) -> Option<SlotId> {
        self.drag.and_then(|s| s.selected)
    }

    /// Start a gesture. `hit` is the pick result at `position`; swipes are
    /// only tracked when `swipe_enabled` (single-model layout).
    pub fn pointer_down(
        &mut self,
        position: Vec2,
        kind: PointerKind,
        hit: Option<SlotId>,
        swipe_enabled: bool,
    ) {
        self.drag = Some(DragSession {
            selected: hit,
            last: position,
        });
        if swipe_enabled && kind.is_single_touch() {
            self.swipe.begin(position);
        } else {
            self.swipe.cancel();
        }
    }

    /// Continue a gesture. Moves without a live gesture (mouse hover) do
    /// nothing.
    pub fn pointer_move(&mut self, position: Vec2, kind: PointerKind) -> MoveOutcome {
        let navigate = if kind.is_single_touch() {
            self.swipe.update(position, self.options.swipe_threshold)
        } else {
            None
        };

        let drag = self.drag.as_mut().and_then(|session| {
            let slot = session.selected?;
            let delta = position - session.last;
            session.last = position;
            Some(DragDelta { slot, delta })
        });

        MoveOutcome { drag, navigate }
    }

    /// End the gesture.
    pub fn pointer_up(&mut self) {
        self.drag = None;
        self.swipe.cancel();
    }

    /// Pointer left the viewport; same as releasing.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Map pointer travel onto a target: horizontal → yaw, vertical →
    /// pitch, pitch clamped to ±π/2.
    pub fn apply_drag(&self, target: &mut TargetRotation, delta: Vec2) {
        target.yaw += delta.x * self.options.yaw_sensitivity;
        target.pitch = (target.pitch + delta.y * self.options.pitch_sensitivity)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> InteractionController {
        InteractionController::new(InteractionOptions::default())
    }

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut c = controller();
        c.pointer_down(Vec2::new(10.0, 10.0), PointerKind::Mouse, Some(SlotId(1)), false);
        let first = c.pointer_move(Vec2::new(30.0, 5.0), PointerKind::Mouse);
        assert_eq!(
            first.drag,
            Some(DragDelta {
                slot: SlotId(1),
                delta: Vec2::new(20.0, -5.0)
            })
        );
        let second = c.pointer_move(Vec2::new(31.0, 5.0), PointerKind::Mouse);
        assert_eq!(second.drag.map(|d| d.delta), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn miss_rotates_nothing() {
        let mut c = controller();
        c.pointer_down(Vec2::ZERO, PointerKind::Mouse, None, false);
        assert!(c.session().is_some());
        assert_eq!(c.pointer_move(Vec2::new(50.0, 50.0), PointerKind::Mouse).drag, None);
        assert_eq!(c.dragged_slot(), None);
    }

    #[test]
    fn hover_without_press_is_ignored() {
        let mut c = controller();
        assert_eq!(
            c.pointer_move(Vec2::new(5.0, 5.0), PointerKind::Mouse),
            MoveOutcome::default()
        );
    }

    #[test]
    fn release_and_leave_end_the_gesture() {
        let mut c = controller();
        c.pointer_down(Vec2::ZERO, PointerKind::Mouse, Some(SlotId(0)), false);
        c.pointer_up();
        assert!(c.session().is_none());

        c.pointer_down(Vec2::ZERO, PointerKind::Mouse, Some(SlotId(0)), false);
        c.pointer_leave();
        assert_eq!(c.dragged_slot(), None);
    }

    #[test]
    fn pitch_is_clamped_to_quarter_turn() {
        let c = controller();
        let mut target = TargetRotation::default();
        c.apply_drag(&mut target, Vec2::new(0.0, 1000.0));
        assert_eq!(target.pitch, FRAC_PI_2);
        c.apply_drag(&mut target, Vec2::new(0.0, -5000.0));
        assert_eq!(target.pitch, -FRAC_PI_2);
    }

    #[test]
    fn yaw_is_unbounded() {
        let c = controller();
        let mut target = TargetRotation::default();
        c.apply_drag(&mut target, Vec2::new(1000.0, 0.0));
        assert!((target.yaw - 10.0).abs() < 1e-5);
    }

    #[test]
    fn touch_swipe_only_in_single_mode() {
        let mut c = controller();
        c.pointer_down(Vec2::ZERO, PointerKind::SINGLE_TOUCH, None, false);
        let out = c.pointer_move(Vec2::new(-80.0, 0.0), PointerKind::SINGLE_TOUCH);
        assert_eq!(out.navigate, None);

        c.pointer_up();
        c.pointer_down(Vec2::ZERO, PointerKind::SINGLE_TOUCH, None, true);
        let out = c.pointer_move(Vec2::new(-80.0, 0.0), PointerKind::SINGLE_TOUCH);
        assert_eq!(out.navigate, Some(NavDirection::Next));
    }

    #[test]
    fn pinch_does_not_swipe() {
        let mut c = controller();
        let pinch = PointerKind::Touch { contacts: 2 };
        c.pointer_down(Vec2::ZERO, pinch, None, true);
        assert_eq!(c.pointer_move(Vec2::new(-80.0, 0.0), pinch).navigate, None);
    }
}
