use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of a display slot.
///
/// Assigned from the descriptor's position in the configuration table and
/// never reused, so per-model state stays keyed correctly regardless of the
/// order in which loads complete.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Zero-based position in the descriptor table.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fixed per-asset fine-tune transform applied after fit scaling.
///
/// `scale` multiplies the fit scale component-wise, `position` offsets the
/// recentred model, and `rotation` (Euler XYZ, radians) replaces whatever
/// rotation the model had.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Adjustment {
    /// Component-wise scale multiplier.
    pub scale: Vec3,
    /// World-space offset applied after recentring.
    pub position: Vec3,
    /// Absolute rest rotation (pitch, yaw, roll).
    pub rotation: Vec3,
}

impl Default for Adjustment {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// Static configuration for one displayed asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetDescriptor {
    /// File name relative to the asset directory.
    pub file_name: String,
    /// Fine-tune transform.
    #[serde(default)]
    pub adjustment: Adjustment,
}

impl AssetDescriptor {
    /// Descriptor with an identity adjustment.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            adjustment: Adjustment::default(),
        }
    }

    /// Replace the adjustment transform.
    #[must_use]
    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustment = adjustment;
        self
    }
}

/// The three-weapon lineup the viewport ships with.
#[must_use]
pub fn default_descriptors() -> Vec<AssetDescriptor> {
    let lift = Vec3::new(0.0, 0.5, 0.0);
    vec![
        AssetDescriptor::new("ump.glb").with_adjustment(Adjustment {
            scale: Vec3::splat(2.0),
            position: lift,
            rotation: Vec3::new(0.0, -1.5, 0.0),
        }),
        AssetDescriptor::new("uzi.glb").with_adjustment(Adjustment {
            scale: Vec3::splat(0.8),
            position: lift,
            rotation: Vec3::new(0.0, 1.0, -1.5),
        }),
        AssetDescriptor::new("m416Skin.glb").with_adjustment(Adjustment {
            scale: Vec3::splat(0.8),
            position: lift,
            rotation: Vec3::new(0.0, -9.5, 0.0),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_adjustment_defaults_to_identity() {
        let desc: AssetDescriptor =
            toml::from_str(r#"file_name = "crate.glb""#).unwrap();
        assert_eq!(desc.adjustment, Adjustment::default());
        assert_eq!(desc.adjustment.scale, Vec3::ONE);
    }

    #[test]
    fn partial_adjustment_keeps_other_defaults() {
        let desc: AssetDescriptor = toml::from_str(
            r#"
file_name = "crate.glb"
[adjustment]
position = [0.0, 0.5, 0.0]
"#,
        )
        .unwrap();
        assert_eq!(desc.adjustment.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(desc.adjustment.scale, Vec3::ONE);
    }

    #[test]
    fn default_lineup_order_is_stable() {
        let names: Vec<_> = default_descriptors()
            .into_iter()
            .map(|d| d.file_name)
            .collect();
        assert_eq!(names, ["ump.glb", "uzi.glb", "m416Skin.glb"]);
    }
}
