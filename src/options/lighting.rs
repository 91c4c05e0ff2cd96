use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of directional lights the mesh shader consumes.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// A white directional light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DirectionalLight {
    /// Light position; only its direction matters.
    pub position: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Scene lighting: a flat ambient term plus white directional lights.
pub struct LightingOptions {
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ambient: f32,
    /// Up to [`MAX_DIRECTIONAL_LIGHTS`] lights; extras are ignored.
    #[schemars(skip)]
    pub directional: Vec<DirectionalLight>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        let light = |position, intensity| DirectionalLight {
            position,
            intensity,
        };
        Self {
            ambient: 1.5,
            directional: vec![
                light([-30.0, 10.0, 20.0], 1.2),
                light([30.0, 10.0, 20.0], 1.2),
                light([0.0, 30.0, 30.0], 1.2),
                light([0.0, -30.0, 30.0], 0.7),
            ],
        }
    }
}
