//! The showcase component: owns the session, the repository, the renderer
//! and both frame loops.
//!
//! # Lifecycle
//!
//! [`Showcase::mount`] classifies the viewport, starts every model load,
//! registers the host listeners and requests the viewport and marquee
//! frames. The host then forwards input through
//! [`handle_event`](Showcase::handle_event) and calls
//! [`on_frame`](Showcase::on_frame) on every refresh.
//! [`teardown`](Showcase::teardown) (also run on drop) cancels both frame
//! loops, removes the listeners, releases GPU resources and detaches the
//! repository.
//!
//! # Frame loop
//!
//! Each viewport tick drains finished loads, advances idle return and
//! easing for visible models, and draws once. The marquee tick only
//! scrolls text.

mod frame;
mod input;
mod renderer;
pub mod scheduler;
pub mod session;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use web_time::Instant;

pub use renderer::{DrawItem, SceneRenderer};
pub use scheduler::{FrameCallback, FrameScheduler, Listener, ListenerRegistry};
pub use session::{LoadedModel, ViewportSession};

use crate::asset::{MeshGraph, ModelLoader, ModelRepository, RepositoryEvent, SlotId};
use crate::error::VitrineError;
use crate::marquee::MarqueeDriver;
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;
use crate::viewport::{DeviceEnvironment, ViewportState};

/// What ran during one [`Showcase::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    /// The viewport loop ticked and drew.
    pub viewport_ticked: bool,
    /// New marquee offset (px) if the marquee loop ticked.
    pub marquee_offset: Option<f32>,
}

/// Initial host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f32,
}

/// The mounted 3D showcase.
pub struct Showcase<R: SceneRenderer> {
    session: ViewportSession,
    repository: ModelRepository,
    renderer: R,
    scheduler: FrameScheduler,
    listeners: ListenerRegistry,
    marquee: MarqueeDriver,
    marquee_content_width: f32,
    env: Box<dyn DeviceEnvironment>,
    uploaded: FxHashSet<SlotId>,
    frame_timing: FrameTiming,
    torn_down: bool,
}

impl<R: SceneRenderer> Showcase<R> {
    /// Mount: start loads, register listeners, request both frame loops.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ThreadSpawn`] if loader threads cannot be
    /// started.
    pub fn mount(
        options: Options,
        mut renderer: R,
        loader: Arc<dyn ModelLoader>,
        env: Box<dyn DeviceEnvironment>,
        surface: SurfaceSize,
        now: Instant,
    ) -> Result<Self, VitrineError> {
        let viewport = ViewportState::classify(
            surface.width,
            surface.height,
            surface.pixel_ratio,
            env.as_ref(),
            options.layout.mobile_breakpoint,
        );
        let (w, h) = viewport.physical_size(options.display.max_pixel_ratio);
        renderer.resize(w, h);

        let marquee = MarqueeDriver::new(options.marquee.clone(), surface.width);
        let mut repository = ModelRepository::new(options.assets.models.len());
        repository.request_all(&options.assets.models, &loader)?;

        let mut listeners = ListenerRegistry::default();
        for listener in Listener::ALL {
            let _ = listeners.register(listener);
        }
        let mut scheduler = FrameScheduler::new();
        let _ = scheduler.request(FrameCallback::Viewport);
        let _ = scheduler.request(FrameCallback::Marquee);

        log::info!(
            "showcase mounted: {} model(s), {:?} layout",
            options.assets.models.len(),
            viewport.class
        );

        Ok(Self {
            session: ViewportSession::new(options, viewport),
            repository,
            renderer,
            scheduler,
            listeners,
            marquee,
            marquee_content_width: 0.0,
            env,
            uploaded: FxHashSet::default(),
            frame_timing: FrameTiming::new(now),
            torn_down: false,
        })
    }

    /// Session state.
    #[must_use]
    pub fn session(&self) -> &ViewportSession {
        &self.session
    }

    /// Load tracking.
    #[must_use]
    pub fn repository(&self) -> &ModelRepository {
        &self.repository
    }

    /// Drawing backend.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable drawing backend.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frame request table.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Registered host listeners.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Marquee state.
    #[must_use]
    pub fn marquee(&self) -> &MarqueeDriver {
        &self.marquee
    }

    /// Host-measured width of the doubled marquee track.
    pub fn set_marquee_content_width(&mut self, width: f32) {
        self.marquee_content_width = width.max(0.0);
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Apply finished loads: upload geometry, insert into the session and
    /// lay out. Safe to call at any time.
    pub fn pump_loads(&mut self, now: Instant) {
        for event in self.repository.poll() {
            self.apply_event(event, now);
        }
    }

    /// Resolve a load the host performed itself. The result goes through
    /// the same upload and layout path as background loads; a later
    /// background completion for the same slot is ignored.
    pub fn record_load(
        &mut self,
        slot: SlotId,
        result: Result<MeshGraph, VitrineError>,
        now: Instant,
    ) {
        for event in self.repository.record(slot, result) {
            self.apply_event(event, now);
        }
    }

    fn apply_event(&mut self, event: RepositoryEvent, now: Instant) {
        match event {
            RepositoryEvent::Loaded(slot, graph) => {
                if let Err(e) = self.renderer.upload(slot, &graph) {
                    log::error!("slot {slot}: upload failed: {e}");
                    self.repository.reject(slot);
                    return;
                }
                let _ = self.uploaded.insert(slot);
                let _ = self.session.insert_model(slot, graph, now);
            }
            RepositoryEvent::Failed(slot) => {
                log::warn!("slot {slot} stays empty");
            }
            RepositoryEvent::AllLoaded => {
                // An upload failure earlier in the batch withdraws it.
                if self.repository.is_complete() {
                    self.session.relayout();
                }
            }
        }
    }

    /// Stop both loops, drop listeners, free GPU resources, detach
    /// loaders. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        let _ = self.scheduler.cancel(FrameCallback::Viewport);
        let _ = self.scheduler.cancel(FrameCallback::Marquee);
        let removed = self.listeners.clear();
        let mut slots: Vec<SlotId> = self.uploaded.drain().collect();
        slots.sort_unstable();
        for slot in &slots {
            self.renderer.release(*slot);
        }
        self.repository.shutdown();
        log::info!(
            "showcase torn down: {removed} listener(s), {} model(s) released",
            slots.len()
        );
    }
}

impl<R: SceneRenderer> Drop for Showcase<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
