//! The per-frame tick.

use web_time::Instant;

use super::session::ViewportSession;
use super::{FrameOutcome, SceneRenderer, Showcase};
use crate::animation::ease_rotation;
use crate::engine::scheduler::FrameCallback;

impl ViewportSession {
    /// Advance every visible model one frame: idle return on the target
    /// pitch first, then ease the current rotation toward the target.
    /// Models hidden by the single-model layout are left untouched.
    pub fn advance(&mut self, now: Instant) {
        let dragged = self.interaction().dragged_slot();
        let motion = self.options().motion.clone();
        for slot in self.loaded_slots() {
            let Some(model) = self.model_mut(slot) else {
                continue;
            };
            if !model.visible {
                continue;
            }
            let idle_for = now.saturating_duration_since(model.last_interaction);
            let _ = model
                .idle
                .step(&mut model.target, idle_for, dragged == Some(slot), &motion);
            ease_rotation(&mut model.transform.rotation, model.target, motion.ease_factor);
        }
    }
}

impl<R: SceneRenderer> Showcase<R> {
    /// Run the callbacks due on this refresh. Each one re-requests itself,
    /// so after [`teardown`](Self::teardown) nothing runs.
    pub fn on_frame(&mut self, now: Instant) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        for callback in self.scheduler.take_due() {
            match callback {
                FrameCallback::Viewport => {
                    self.tick_viewport(now);
                    outcome.viewport_ticked = true;
                }
                FrameCallback::Marquee => {
                    let offset = self.marquee.tick(self.marquee_content_width);
                    outcome.marquee_offset = Some(offset);
                }
            }
            let _ = self.scheduler.request(callback);
        }
        outcome
    }

    fn tick_viewport(&mut self, now: Instant) {
        self.pump_loads(now);
        self.session.advance(now);
        let items = self.session.draw_items();
        if let Err(e) = self.renderer.draw(self.session.camera(), &items) {
            log::error!("frame skipped: {e}");
        }
        self.frame_timing.end_frame(now);
        if self.frame_timing.frame_count() % 600 == 0 {
            log::debug!("{:.1} fps", self.frame_timing.fps());
        }
    }
}
