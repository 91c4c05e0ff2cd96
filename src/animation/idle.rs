use std::time::Duration;

use super::TargetRotation;
use crate::options::MotionOptions;

/// Idle auto-return latch for one model.
///
/// Engages once the model has been left alone longer than the idle delay
/// with a noticeable pitch, then shrinks pitch geometrically every frame
/// until it snaps to exactly zero. The latch keeps the return going below
/// the engagement threshold so it always finishes at zero. Yaw is never
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleReturn {
    returning: bool,
}

impl IdleReturn {
    /// Whether a return is in progress.
    #[must_use]
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// User touched the model; stop returning.
    pub fn interrupt(&mut self) {
        self.returning = false;
    }

    /// Advance one frame. Returns `true` if the target pitch changed.
    pub fn step(
        &mut self,
        target: &mut TargetRotation,
        idle_for: Duration,
        dragged: bool,
        motion: &MotionOptions,
    ) -> bool {
        if dragged {
            self.returning = false;
            return false;
        }
        if !self.returning
            && target.pitch.abs() > motion.idle_threshold
            && idle_for > motion.idle_delay()
        {
            self.returning = true;
        }
        if !self.returning {
            return false;
        }

        target.pitch *= 1.0 - motion.decay_rate;
        if target.pitch.abs() < motion.snap_epsilon {
            target.pitch = 0.0;
            self.returning = false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: Duration = Duration::from_millis(1500);

    fn tilted(pitch: f32) -> TargetRotation {
        TargetRotation { pitch, yaw: 0.8 }
    }

    #[test]
    fn decays_monotonically_to_exact_zero() {
        let motion = MotionOptions::default();
        let mut latch = IdleReturn::default();
        let mut target = tilted(1.0);
        let mut last = target.pitch.abs();
        let mut frames = 0;
        while target.pitch != 0.0 {
            assert!(latch.step(&mut target, LONG, false, &motion));
            assert!(target.pitch.abs() < last);
            assert_eq!(target.yaw, 0.8);
            last = target.pitch.abs();
            frames += 1;
            assert!(frames < 1000, "never converged");
        }
        assert_eq!(target.pitch, 0.0);
        assert!(!latch.is_returning());
        // Settled: nothing more to do.
        assert!(!latch.step(&mut target, LONG, false, &motion));
    }

    #[test]
    fn negative_pitch_returns_too() {
        let motion = MotionOptions::default();
        let mut latch = IdleReturn::default();
        let mut target = tilted(-0.6);
        for _ in 0..1000 {
            let _ = latch.step(&mut target, LONG, false, &motion);
        }
        assert_eq!(target.pitch, 0.0);
    }

    #[test]
    fn waits_for_idle_delay() {
        let motion = MotionOptions::default();
        let mut latch = IdleReturn::default();
        let mut target = tilted(0.5);
        assert!(!latch.step(
            &mut target,
            Duration::from_millis(400),
            false,
            &motion
        ));
        assert_eq!(target.pitch, 0.5);
    }

    #[test]
    fn small_tilt_is_left_alone() {
        let motion = MotionOptions::default();
        let mut latch = IdleReturn::default();
        let mut target = tilted(0.04);
        assert!(!latch.step(&mut target, LONG, false, &motion));
        assert_eq!(target.pitch, 0.04);
    }

    #[test]
    fn dragged_model_does_not_return() {
        let motion = MotionOptions::default();
        let mut latch = IdleReturn::default();
        let mut target = tilted(0.5);
        let _ = latch.step(&mut target, LONG, false, &motion);
        assert!(latch.is_returning());
        let before = target.pitch;
        assert!(!latch.step(&mut target, LONG, true, &motion));
        assert_eq!(target.pitch, before);
        assert!(!latch.is_returning());
    }
}
