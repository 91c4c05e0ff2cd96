//! Standalone showcase window backed by winit.
//!
//! ```no_run
//! # use vitrine::Viewer;
//! Viewer::builder()
//!     .with_title("Showcase")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use glam::Vec2;
use rustc_hash::FxHashSet;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    asset::{GltfLoader, ModelLoader},
    engine::{Showcase, SurfaceSize},
    error::VitrineError,
    gpu::{MeshRenderer, RenderContext},
    input::{InputEvent, NavDirection, PointerKind},
    options::Options,
    viewport::NativeEnvironment,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Vitrine".into(),
        }
    }

    /// Override the default options (asset lineup, layout, lighting...).
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the configured model lineup.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), VitrineError> {
        let event_loop = EventLoop::new()
            .map_err(|e| VitrineError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            showcase: None,
            options: Some(self.options),
            title: self.title,
            cursor: Vec2::ZERO,
            touches: FxHashSet::default(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VitrineError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    showcase: Option<Showcase<MeshRenderer>>,
    /// Taken when the showcase mounts.
    options: Option<Options>,
    title: String,
    /// Last cursor position, logical pixels.
    cursor: Vec2,
    /// Active touch ids.
    touches: FxHashSet<u64>,
}

fn surface_size(inner: PhysicalSize<u32>, scale: f64) -> SurfaceSize {
    let scale = scale as f32;
    SurfaceSize {
        width: inner.width.max(1) as f32 / scale,
        height: inner.height.max(1) as f32 / scale,
        pixel_ratio: scale,
    }
}

fn logical(position: PhysicalPosition<f64>, scale: f64) -> Vec2 {
    Vec2::new(
        (position.x / scale) as f32,
        (position.y / scale) as f32,
    )
}

impl ViewerApp {
    fn scale(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn dispatch(&mut self, event: InputEvent) {
        if let Some(showcase) = &mut self.showcase {
            showcase.handle_event(event, Instant::now());
        }
    }

    fn mount(
        &mut self,
        window: &Arc<Window>,
    ) -> Result<Showcase<MeshRenderer>, VitrineError> {
        let options = self.options.take().unwrap_or_default();
        let inner = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(window),
            (inner.width, inner.height),
        ))?;
        let renderer = MeshRenderer::new(context, &options);
        let loader: Arc<dyn ModelLoader> =
            Arc::new(GltfLoader::new(options.assets.directory.clone()));
        Showcase::mount(
            options,
            renderer,
            loader,
            Box::new(NativeEnvironment),
            surface_size(inner, window.scale_factor()),
            Instant::now(),
        )
    }

    fn touch(&mut self, phase: TouchPhase, id: u64, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                let _ = self.touches.insert(id);
                let kind = PointerKind::Touch {
                    contacts: self.touches.len().min(u8::MAX as usize) as u8,
                };
                self.dispatch(InputEvent::PointerDown { position, kind });
            }
            TouchPhase::Moved => {
                let kind = PointerKind::Touch {
                    contacts: self.touches.len().min(u8::MAX as usize) as u8,
                };
                self.dispatch(InputEvent::PointerMove { position, kind });
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let _ = self.touches.remove(&id);
                if self.touches.is_empty() {
                    self.dispatch(InputEvent::PointerUp {
                        position,
                        kind: PointerKind::SINGLE_TOUCH,
                    });
                }
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.mount(&window) {
            Ok(showcase) => self.showcase = Some(showcase),
            Err(e) => {
                log::error!("failed to mount showcase: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(showcase) = &mut self.showcase {
                showcase.teardown();
            }
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.showcase.is_none() {
            return;
        }
        let scale = self.scale();

        match event {
            WindowEvent::Resized(inner) => {
                let size = surface_size(inner, scale);
                self.dispatch(InputEvent::Resize {
                    width: size.width,
                    height: size.height,
                    pixel_ratio: size.pixel_ratio,
                });
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(inner) = self.window.as_ref().map(|w| w.inner_size())
                {
                    let size = surface_size(inner, scale_factor);
                    self.dispatch(InputEvent::Resize {
                        width: size.width,
                        height: size.height,
                        pixel_ratio: size.pixel_ratio,
                    });
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(showcase) = &mut self.showcase {
                    let _ = showcase.on_frame(Instant::now());
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let position = self.cursor;
                let kind = PointerKind::Mouse;
                self.dispatch(match state {
                    ElementState::Pressed => {
                        InputEvent::PointerDown { position, kind }
                    }
                    ElementState::Released => {
                        InputEvent::PointerUp { position, kind }
                    }
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = logical(position, scale);
                self.dispatch(InputEvent::PointerMove {
                    position: self.cursor,
                    kind: PointerKind::Mouse,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                self.dispatch(InputEvent::PointerLeave);
            }

            WindowEvent::Touch(touch) => {
                self.touch(touch.phase, touch.id, logical(touch.location, scale));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some(direction) = NavDirection::from_key(&event.logical_key)
                {
                    self.dispatch(InputEvent::Navigate(direction));
                }
            }

            _ => (),
        }
    }
}
