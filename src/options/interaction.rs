use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer-to-rotation mapping and gesture thresholds.
pub struct InteractionOptions {
    /// Radians of yaw per pixel of horizontal drag.
    #[schemars(title = "Yaw Sensitivity", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub yaw_sensitivity: f32,
    /// Radians of pitch per pixel of vertical drag.
    #[schemars(title = "Pitch Sensitivity", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub pitch_sensitivity: f32,
    /// Horizontal travel (px) a touch swipe needs to change the selection.
    #[schemars(title = "Swipe Threshold", range(min = 10.0, max = 200.0), extend("step" = 1.0))]
    pub swipe_threshold: f32,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            yaw_sensitivity: 0.01,
            pitch_sensitivity: 0.01,
            swipe_threshold: 40.0,
        }
    }
}
