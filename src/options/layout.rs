use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Responsive arrangement parameters.
pub struct LayoutOptions {
    /// Fraction of the visible height the largest model should fill.
    #[schemars(title = "Fill", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub fill_fraction: f32,
    /// Fraction of the visible width the desktop row spans.
    #[schemars(title = "Row Width", range(min = 0.2, max = 1.0), extend("step" = 0.05))]
    pub row_width_fraction: f32,
    /// World-space Y the shared vertical centre is placed at.
    #[schemars(title = "Vertical Offset", range(min = -2.0, max = 2.0), extend("step" = 0.05))]
    pub vertical_offset: f32,
    /// Scale used when every loaded model has zero extent.
    #[schemars(skip)]
    pub fallback_scale: f32,
    /// Viewport width (logical px) below which the single-model layout is
    /// used.
    #[schemars(title = "Mobile Breakpoint", range(min = 320.0, max = 1600.0), extend("step" = 10.0))]
    pub mobile_breakpoint: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            fill_fraction: 0.6,
            row_width_fraction: 0.7,
            vertical_offset: 0.0,
            fallback_scale: 1.0,
            mobile_breakpoint: 700.0,
        }
    }
}
