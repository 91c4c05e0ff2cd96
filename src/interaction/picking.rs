use glam::Mat4;

use crate::asset::{MeshGraph, SlotId};
use crate::camera::Ray;

/// A drawn model that can be picked.
#[derive(Debug, Clone, Copy)]
pub struct PickTarget<'a> {
    /// Display slot.
    pub slot: SlotId,
    /// Geometry.
    pub graph: &'a MeshGraph,
    /// Current model-to-world matrix.
    pub model: Mat4,
}

/// Slot of the nearest model hit by `ray`, or `None` when nothing is hit.
///
/// Callers pass only visible models; hidden models are never pickable.
pub fn pick<'a>(
    ray: &Ray,
    targets: impl IntoIterator<Item = PickTarget<'a>>,
) -> Option<SlotId> {
    targets
        .into_iter()
        .filter_map(|t| t.graph.raycast(ray, t.model).map(|d| (t.slot, d)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::asset::mesh::cuboid;

    #[test]
    fn nearest_of_overlapping_models_wins() {
        let near = cuboid("near", Vec3::ONE, [1.0; 4]);
        let far = cuboid("far", Vec3::ONE, [1.0; 4]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let targets = [
            PickTarget {
                slot: SlotId(0),
                graph: &far,
                model: Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)),
            },
            PickTarget {
                slot: SlotId(1),
                graph: &near,
                model: Mat4::IDENTITY,
            },
        ];
        assert_eq!(pick(&ray, targets), Some(SlotId(1)));
    }

    #[test]
    fn empty_space_selects_nothing() {
        let graph = cuboid("box", Vec3::ONE, [1.0; 4]);
        let ray = Ray::new(Vec3::new(5.0, 5.0, 10.0), Vec3::NEG_Z);
        let targets = [PickTarget {
            slot: SlotId(0),
            graph: &graph,
            model: Mat4::IDENTITY,
        }];
        assert_eq!(pick(&ray, targets), None);
    }
}
