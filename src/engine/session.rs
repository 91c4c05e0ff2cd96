//! The viewport session: every piece of per-showcase state in one owned
//! value, keyed by [`SlotId`].

use glam::Vec2;
use rustc_hash::FxHashMap;
use web_time::Instant;

use super::renderer::DrawItem;
use crate::animation::{IdleReturn, TargetRotation};
use crate::asset::{AssetDescriptor, MeshGraph, SlotId};
use crate::camera::Camera;
use crate::input::{NavDirection, PointerKind};
use crate::interaction::{pick, step_selection, InteractionController, PickTarget};
use crate::layout::{Layout, LayoutEngine, LayoutItem, LayoutMode, ModelTransform};
use crate::options::Options;
use crate::viewport::{DeviceEnvironment, ViewportState};

/// A model whose load completed.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Display slot.
    pub slot: SlotId,
    /// Geometry.
    pub graph: MeshGraph,
    /// Current placement; rotation is advanced by the frame tick.
    pub transform: ModelTransform,
    /// Drawn and pickable.
    pub visible: bool,
    /// Orientation the frame tick eases toward.
    pub target: TargetRotation,
    /// Last drag applied to this model (load time until then).
    pub last_interaction: Instant,
    /// Idle auto-return latch.
    pub idle: IdleReturn,
    placed: bool,
}

impl LoadedModel {
    fn new(slot: SlotId, graph: MeshGraph, descriptor: &AssetDescriptor, now: Instant) -> Self {
        Self {
            slot,
            graph,
            transform: ModelTransform::default(),
            visible: false,
            target: TargetRotation::from_rest(descriptor.adjustment.rotation),
            last_interaction: now,
            idle: IdleReturn::default(),
            placed: false,
        }
    }

    /// Whether a layout has placed this model at least once.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }
}

/// Owned viewport state.
#[derive(Debug)]
pub struct ViewportSession {
    options: Options,
    descriptors: Vec<AssetDescriptor>,
    models: FxHashMap<SlotId, LoadedModel>,
    selection: SlotId,
    viewport: ViewportState,
    camera: Camera,
    layout_engine: LayoutEngine,
    interaction: InteractionController,
    layout: Option<Layout>,
}

impl ViewportSession {
    /// Session for the lineup in `options.assets`.
    #[must_use]
    pub fn new(options: Options, viewport: ViewportState) -> Self {
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        Self {
            descriptors: options.assets.models.clone(),
            layout_engine: LayoutEngine::new(options.layout.clone()),
            interaction: InteractionController::new(options.interaction.clone()),
            models: FxHashMap::default(),
            selection: SlotId::default(),
            viewport,
            camera,
            layout: None,
            options,
        }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Configured lineup.
    #[must_use]
    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.descriptors
    }

    /// Camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Selected slot for the single-model layout.
    #[must_use]
    pub fn selection(&self) -> SlotId {
        self.selection
    }

    /// Most recent layout.
    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Gesture state.
    #[must_use]
    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// Model in `slot`, if loaded.
    #[must_use]
    pub fn model(&self, slot: SlotId) -> Option<&LoadedModel> {
        self.models.get(&slot)
    }

    /// Mutable model in `slot`.
    pub fn model_mut(&mut self, slot: SlotId) -> Option<&mut LoadedModel> {
        self.models.get_mut(&slot)
    }

    /// Number of loaded models.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.models.len()
    }

    /// Loaded slots in display order.
    #[must_use]
    pub fn loaded_slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self.models.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    /// Layout mode for the current viewport.
    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        if self.viewport.is_mobile() {
            LayoutMode::Single
        } else {
            LayoutMode::Row
        }
    }

    /// Add a freshly loaded model and lay out the loaded set. Completions
    /// for unknown or already loaded slots are ignored.
    pub fn insert_model(&mut self, slot: SlotId, graph: MeshGraph, now: Instant) -> bool {
        let Some(descriptor) = self.descriptors.get(slot.index()) else {
            log::warn!("no descriptor for slot {slot}");
            return false;
        };
        if self.models.contains_key(&slot) {
            return false;
        }
        let model = LoadedModel::new(slot, graph, descriptor, now);
        let _ = self.models.insert(slot, model);
        self.relayout();
        true
    }

    /// Re-run the layout from scratch over the loaded models.
    ///
    /// Scale, position and visibility always follow the new layout. The
    /// rest rotation is applied only on a model's first placement; after
    /// that the eased pitch and yaw are kept.
    pub fn relayout(&mut self) {
        let slots = self.loaded_slots();
        let items: Vec<LayoutItem<'_>> = slots
            .iter()
            .filter_map(|slot| {
                let model = self.models.get(slot)?;
                let descriptor = self.descriptors.get(slot.index())?;
                Some(LayoutItem {
                    slot: *slot,
                    graph: &model.graph,
                    adjustment: &descriptor.adjustment,
                })
            })
            .collect();
        let layout = self.layout_engine.compute(
            &items,
            &self.camera,
            self.layout_mode(),
            self.selection,
        );
        drop(items);

        for placement in &layout.placements {
            let Some(model) = self.models.get_mut(&placement.slot) else {
                continue;
            };
            model.transform.scale = placement.transform.scale;
            model.transform.position = placement.transform.position;
            model.visible = placement.visible;
            if model.placed {
                model.transform.rotation.z = placement.transform.rotation.z;
            } else {
                model.transform.rotation = placement.transform.rotation;
                model.placed = true;
            }
        }
        self.layout = Some(layout);
    }

    /// New viewport size or orientation: reclassify, update the camera,
    /// lay out again.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        pixel_ratio: f32,
        env: &dyn DeviceEnvironment,
    ) {
        self.viewport = ViewportState::classify(
            width,
            height,
            pixel_ratio,
            env,
            self.options.layout.mobile_breakpoint,
        );
        self.camera.set_aspect(width, height);
        log::debug!(
            "viewport {width}x{height} @{pixel_ratio} -> {:?}",
            self.viewport.class
        );
        self.relayout();
    }

    /// Step the selection over the configured lineup. Returns whether it
    /// changed.
    pub fn navigate(&mut self, direction: NavDirection) -> bool {
        let next = step_selection(self.selection, direction, self.descriptors.len());
        if next == self.selection {
            return false;
        }
        self.selection = next;
        log::debug!("selection -> {next}");
        self.relayout();
        true
    }

    /// Press: pick the nearest visible model under `position`.
    pub fn pointer_down(&mut self, position: Vec2, kind: PointerKind) -> Option<SlotId> {
        let ray = self.camera.ray_from_ndc(self.viewport.to_ndc(position));
        let hit = pick(
            &ray,
            self.models.values().filter(|m| m.visible).map(|m| PickTarget {
                slot: m.slot,
                graph: &m.graph,
                model: m.transform.matrix(),
            }),
        );
        self.interaction
            .pointer_down(position, kind, hit, self.viewport.is_mobile());
        hit
    }

    /// Move: rotate the held model, or apply a swipe step. A swipe that
    /// changes the selection ends the gesture so the now hidden model stops
    /// turning.
    pub fn pointer_move(&mut self, position: Vec2, kind: PointerKind, now: Instant) {
        let outcome = self.interaction.pointer_move(position, kind);
        if let Some(direction) = outcome.navigate {
            if self.navigate(direction) {
                self.interaction.pointer_up();
                return;
            }
        }
        if let Some(drag) = outcome.drag {
            if let Some(model) = self.models.get_mut(&drag.slot) {
                self.interaction.apply_drag(&mut model.target, drag.delta);
                model.last_interaction = now;
                model.idle.interrupt();
            }
        }
    }

    /// Release or leave: end the gesture.
    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Visible models to draw, in slot order.
    #[must_use]
    pub fn draw_items(&self) -> Vec<DrawItem> {
        self.loaded_slots()
            .into_iter()
            .filter_map(|slot| self.models.get(&slot))
            .filter(|m| m.visible)
            .map(|m| DrawItem {
                slot: m.slot,
                model: m.transform.matrix(),
            })
            .collect()
    }
}
