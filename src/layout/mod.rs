//! Responsive layout.
//!
//! [`LayoutEngine::compute`] is a pure function of the loaded models, the
//! camera and the mode: it never reads the models' current transforms, so
//! running it twice yields the same placements.
//!
//! All models share one fit scale chosen so the largest raw bounding
//! dimension fills a fraction of the visible height. Each model is then
//! fine-tuned by its [`Adjustment`], recentred, and either arranged in an
//! evenly spaced row (desktop) or centred one at a time (mobile).

mod transform;

use glam::{Mat4, Vec3};

pub use transform::{euler_xyz, ModelTransform};

use crate::asset::{Aabb, Adjustment, MeshGraph, SlotId};
use crate::camera::Camera;
use crate::options::LayoutOptions;

/// Arrangement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// All models side by side.
    Row,
    /// Only the selected model, centred.
    Single,
}

/// One loaded model as seen by the layout.
#[derive(Debug, Clone, Copy)]
pub struct LayoutItem<'a> {
    /// Display slot.
    pub slot: SlotId,
    /// Geometry.
    pub graph: &'a MeshGraph,
    /// Fine-tune transform from the descriptor.
    pub adjustment: &'a Adjustment,
}

/// Computed placement for one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Display slot.
    pub slot: SlotId,
    /// Rest transform (rotation is the adjustment rotation).
    pub transform: ModelTransform,
    /// Whether the slot is drawn in this mode.
    pub visible: bool,
    /// World-space bounding size in the rest pose.
    pub size: Vec3,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Mode the placements were computed for.
    pub mode: LayoutMode,
    /// Shared fit scale before per-model adjustment.
    pub fit_scale: f32,
    /// Row width in world units (row mode only, 0 otherwise).
    pub row_width: f32,
    /// Gap between adjacent models (row mode only).
    pub spacing: f32,
    /// Placements in slot order.
    pub placements: Vec<Placement>,
}

impl Layout {
    /// Placement for `slot`, if it was laid out.
    #[must_use]
    pub fn placement(&self, slot: SlotId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.slot == slot)
    }
}

/// Rest-pose measurements of one item.
struct Measured {
    size: Vec3,
    center: Vec3,
    scale: Vec3,
}

/// Fit-scale and arrangement rules.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Engine with the given parameters.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Parameters in use.
    #[must_use]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Shared scale fitting the largest raw dimension into
    /// `fill_fraction` of the visible height.
    #[must_use]
    pub fn fit_scale(&self, items: &[LayoutItem<'_>], camera: &Camera) -> f32 {
        let max_dim = items
            .iter()
            .filter_map(|item| item.graph.bounds(Mat4::IDENTITY))
            .map(|b| b.max_extent())
            .fold(0.0_f32, f32::max);
        if max_dim > f32::EPSILON {
            self.options.fill_fraction * camera.visible_height() / max_dim
        } else {
            self.options.fallback_scale
        }
    }

    /// Lay out `items` (slot order) for `mode`. In single mode only
    /// `selection` is visible.
    #[must_use]
    pub fn compute(
        &self,
        items: &[LayoutItem<'_>],
        camera: &Camera,
        mode: LayoutMode,
        selection: SlotId,
    ) -> Layout {
        let fit_scale = self.fit_scale(items, camera);

        let measured: Vec<Measured> = items
            .iter()
            .map(|item| {
                let scale = fit_scale * item.adjustment.scale;
                let rest = Mat4::from_scale_rotation_translation(
                    scale,
                    euler_xyz(item.adjustment.rotation),
                    Vec3::ZERO,
                );
                let bounds = item
                    .graph
                    .bounds(rest)
                    .unwrap_or(Aabb::new(Vec3::ZERO, Vec3::ZERO));
                Measured {
                    size: bounds.size(),
                    center: bounds.center(),
                    scale,
                }
            })
            .collect();

        // Recentred boxes sit at their adjustment offset; the shared
        // vertical and depth centres come from their union.
        let shared = items
            .iter()
            .zip(&measured)
            .map(|(item, m)| {
                let half = m.size * 0.5;
                Aabb::new(
                    item.adjustment.position - half,
                    item.adjustment.position + half,
                )
            })
            .reduce(|a, b| a.union(&b))
            .map_or(Vec3::ZERO, |b| b.center());

        let visible_width = camera.visible_width();
        let (row_width, spacing) = match mode {
            LayoutMode::Row => {
                let row_width = self.options.row_width_fraction * visible_width;
                let total: f32 = measured.iter().map(|m| m.size.x).sum();
                let spacing = if items.len() > 1 {
                    (row_width - total).max(0.0) / (items.len() - 1) as f32
                } else {
                    0.0
                };
                (row_width, spacing)
            }
            LayoutMode::Single => (0.0, 0.0),
        };

        let mut cursor = -row_width * 0.5;
        let placements = items
            .iter()
            .zip(&measured)
            .map(|(item, m)| {
                let adj = item.adjustment;
                let x = match mode {
                    LayoutMode::Row => {
                        let x = cursor + m.size.x * 0.5 - m.center.x + adj.position.x;
                        cursor += m.size.x + spacing;
                        x
                    }
                    LayoutMode::Single => -m.center.x + adj.position.x,
                };
                let y = -m.center.y + adj.position.y - shared.y
                    + self.options.vertical_offset;
                let z = -m.center.z + adj.position.z - shared.z;
                Placement {
                    slot: item.slot,
                    transform: ModelTransform {
                        scale: m.scale,
                        position: Vec3::new(x, y, z),
                        rotation: adj.rotation,
                    },
                    visible: match mode {
                        LayoutMode::Row => true,
                        LayoutMode::Single => item.slot == selection,
                    },
                    size: m.size,
                }
            })
            .collect();

        log::debug!(
            "layout {mode:?}: {} model(s), fit scale {fit_scale:.3}, row {row_width:.2}, spacing {spacing:.2}",
            items.len()
        );

        Layout {
            mode,
            fit_scale,
            row_width,
            spacing,
            placements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::mesh::cuboid;
    use crate::asset::{default_descriptors, AssetDescriptor};
    use crate::options::CameraOptions;

    fn camera(aspect: f32) -> Camera {
        Camera::from_options(&CameraOptions::default(), aspect)
    }

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutOptions::default())
    }

    fn lineup() -> (Vec<MeshGraph>, Vec<AssetDescriptor>) {
        let graphs = vec![
            cuboid("ump", Vec3::new(1.2, 0.5, 0.2), [1.0; 4]),
            cuboid("uzi", Vec3::new(0.6, 0.4, 0.1), [1.0; 4]),
            cuboid("m416", Vec3::new(2.0, 0.6, 0.2), [1.0; 4]),
        ];
        (graphs, vec![AssetDescriptor::new("a"); 3])
    }

    fn items<'a>(
        graphs: &'a [MeshGraph],
        descriptors: &'a [AssetDescriptor],
    ) -> Vec<LayoutItem<'a>> {
        graphs
            .iter()
            .zip(descriptors)
            .enumerate()
            .map(|(i, (graph, d))| LayoutItem {
                slot: SlotId(i),
                graph,
                adjustment: &d.adjustment,
            })
            .collect()
    }

    #[test]
    fn largest_dimension_fills_sixty_percent() {
        let (graphs, descriptors) = lineup();
        let cam = camera(16.0 / 9.0);
        let s = engine().fit_scale(&items(&graphs, &descriptors), &cam);
        assert!((s * 2.0 - 0.6 * cam.visible_height()).abs() < 1e-4);
    }

    #[test]
    fn empty_geometry_falls_back() {
        let graphs = vec![MeshGraph::new("empty")];
        let descriptors = vec![AssetDescriptor::new("a")];
        let s = engine().fit_scale(&items(&graphs, &descriptors), &camera(1.0));
        assert_eq!(s, 1.0);
    }

    #[test]
    fn row_fills_seventy_percent_when_models_fit() {
        let (graphs, descriptors) = lineup();
        let cam = camera(16.0 / 9.0);
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &cam,
            LayoutMode::Row,
            SlotId(0),
        );
        let total: f32 = layout.placements.iter().map(|p| p.size.x).sum();
        assert!(total <= layout.row_width);
        let span = total + 2.0 * layout.spacing;
        assert!((span - 0.7 * cam.visible_width()).abs() < 1e-4);
    }

    #[test]
    fn row_gaps_are_uniform() {
        let (graphs, descriptors) = lineup();
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &camera(16.0 / 9.0),
            LayoutMode::Row,
            SlotId(0),
        );
        let edges: Vec<(f32, f32)> = layout
            .placements
            .iter()
            .map(|p| {
                let x = p.transform.position.x;
                (x - p.size.x * 0.5, x + p.size.x * 0.5)
            })
            .collect();
        let gap0 = edges[1].0 - edges[0].1;
        let gap1 = edges[2].0 - edges[1].1;
        assert!((gap0 - gap1).abs() < 1e-4);
        assert!((gap0 - layout.spacing).abs() < 1e-4);
        assert!((edges[0].0 + layout.row_width * 0.5).abs() < 1e-4);
    }

    #[test]
    fn crowded_row_has_zero_spacing() {
        let (graphs, descriptors) = lineup();
        // Tall, narrow viewport: summed widths exceed the row width.
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &camera(0.5),
            LayoutMode::Row,
            SlotId(0),
        );
        assert_eq!(layout.spacing, 0.0);
    }

    #[test]
    fn compute_is_idempotent() {
        let graphs = vec![
            cuboid("ump", Vec3::new(1.2, 0.5, 0.2), [1.0; 4]),
            cuboid("uzi", Vec3::new(0.6, 0.4, 0.1), [1.0; 4]),
            cuboid("m416", Vec3::new(2.0, 0.6, 0.2), [1.0; 4]),
        ];
        let descriptors = default_descriptors();
        let cam = camera(16.0 / 9.0);
        let it = items(&graphs, &descriptors);
        let a = engine().compute(&it, &cam, LayoutMode::Row, SlotId(0));
        let b = engine().compute(&it, &cam, LayoutMode::Row, SlotId(0));
        assert_eq!(a, b);
    }

    #[test]
    fn rows_share_vertical_centre() {
        let (graphs, descriptors) = lineup();
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &camera(16.0 / 9.0),
            LayoutMode::Row,
            SlotId(0),
        );
        // Unadjusted cuboids are already centred, so all land on y = 0.
        for p in &layout.placements {
            assert!(p.transform.position.y.abs() < 1e-5);
            assert!(p.transform.position.z.abs() < 1e-5);
        }
    }

    #[test]
    fn single_mode_shows_only_selection_centred() {
        let (graphs, mut descriptors) = lineup();
        descriptors[2].adjustment.position = Vec3::new(0.0, 0.2, 0.4);
        let cam = camera(375.0 / 812.0);
        let it = items(&graphs, &descriptors);
        let single = engine().compute(&it, &cam, LayoutMode::Single, SlotId(1));
        let visible: Vec<SlotId> = single
            .placements
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.slot)
            .collect();
        assert_eq!(visible, vec![SlotId(1)]);
        for p in &single.placements {
            assert!(p.transform.position.x.abs() < 1e-5);
        }

        // Switching back to row mode shows everything with the same scale,
        // vertical and depth placement.
        let row = engine().compute(&it, &cam, LayoutMode::Row, SlotId(1));
        assert!(row.placements.iter().all(|p| p.visible));
        for (a, b) in single.placements.iter().zip(&row.placements) {
            assert_eq!(a.transform.scale, b.transform.scale);
            assert!((a.transform.position.y - b.transform.position.y).abs() < 1e-6);
            assert!((a.transform.position.z - b.transform.position.z).abs() < 1e-6);
        }
        // The offset model sits off the shared centre in both modes.
        let offset = &row.placements[2].transform.position;
        assert!(offset.z > 0.0 && offset.y > 0.0);
    }

    #[test]
    fn single_item_row_starts_at_left_edge() {
        let graphs = vec![cuboid("only", Vec3::ONE, [1.0; 4])];
        let descriptors = vec![AssetDescriptor::new("a")];
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &camera(16.0 / 9.0),
            LayoutMode::Row,
            SlotId(0),
        );
        let p = &layout.placements[0];
        assert_eq!(layout.spacing, 0.0);
        let left = p.transform.position.x - p.size.x * 0.5;
        assert!((left + layout.row_width * 0.5).abs() < 1e-4);
    }

    #[test]
    fn adjustment_offsets_survive_recentring() {
        let graphs = vec![cuboid("a", Vec3::ONE, [1.0; 4])];
        let descriptors = vec![AssetDescriptor::new("a").with_adjustment(
            Adjustment {
                position: Vec3::new(0.3, 0.5, 0.0),
                ..Adjustment::default()
            },
        )];
        let layout = engine().compute(
            &items(&graphs, &descriptors),
            &camera(1.0),
            LayoutMode::Single,
            SlotId(0),
        );
        let p = layout.placements[0].transform.position;
        // x keeps the fine-tune, y is absorbed by the shared centre.
        assert!((p.x - 0.3).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
    }

    #[test]
    fn empty_input_is_empty_layout() {
        let layout = engine().compute(&[], &camera(1.0), LayoutMode::Row, SlotId(0));
        assert!(layout.placements.is_empty());
        assert_eq!(layout.spacing, 0.0);
    }
}
