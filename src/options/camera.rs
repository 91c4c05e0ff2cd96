use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Fixed viewing camera. The camera never moves; models are arranged in
/// front of it on the `z = 0` plane.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Eye distance from the model plane along +Z.
    #[schemars(title = "Distance", range(min = 2.0, max = 30.0), extend("step" = 0.1))]
    pub distance: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 40.0,
            distance: 7.5,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}
