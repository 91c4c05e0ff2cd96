//! Input dispatch for [`Showcase`].

use web_time::Instant;

use super::scheduler::Listener;
use super::{SceneRenderer, Showcase};
use crate::input::InputEvent;

impl<R: SceneRenderer> Showcase<R> {
    /// Process a platform-agnostic input event.
    ///
    /// Mouse and touch go through the same pointer path. Events arriving
    /// after teardown are dropped.
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        if !self.listeners.is_registered(Listener::for_event(&event)) {
            return;
        }
        match event {
            InputEvent::PointerDown { position, kind } => {
                let hit = self.session.pointer_down(position, kind);
                log::debug!("pointer down at {position}: {hit:?}");
            }
            InputEvent::PointerMove { position, kind } => {
                self.session.pointer_move(position, kind, now);
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                self.session.pointer_up();
            }
            InputEvent::Resize {
                width,
                height,
                pixel_ratio,
            }
            | InputEvent::OrientationChange {
                width,
                height,
                pixel_ratio,
            } => self.resize(width, height, pixel_ratio),
            InputEvent::Navigate(direction) => {
                let _ = self.session.navigate(direction);
            }
        }
    }

    fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.session
            .resize(width, height, pixel_ratio, self.env.as_ref());
        let (w, h) = self
            .session
            .viewport()
            .physical_size(self.session.options().display.max_pixel_ratio);
        self.renderer.resize(w, h);
        self.marquee.set_viewport_width(width);
    }
}
