use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Marquee", inline)]
#[serde(default)]
/// Scrolling text speed tiers.
pub struct MarqueeOptions {
    /// Widths below this use `narrow_speed`.
    #[schemars(skip)]
    pub narrow_breakpoint: f32,
    /// Widths below this (and at least `narrow_breakpoint`) use
    /// `medium_speed`.
    #[schemars(skip)]
    pub medium_breakpoint: f32,
    /// Pixels per frame on narrow viewports.
    #[schemars(title = "Narrow Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub narrow_speed: f32,
    /// Pixels per frame on medium viewports.
    #[schemars(title = "Medium Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub medium_speed: f32,
    /// Pixels per frame on wide viewports.
    #[schemars(title = "Wide Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub wide_speed: f32,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            narrow_breakpoint: 600.0,
            medium_breakpoint: 900.0,
            narrow_speed: 0.5,
            medium_speed: 0.8,
            wide_speed: 1.2,
        }
    }
}
