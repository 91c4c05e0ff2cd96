use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Per-frame easing and idle auto-return.
pub struct MotionOptions {
    /// Fraction of the remaining rotation covered each frame.
    #[schemars(title = "Ease", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub ease_factor: f32,
    /// Milliseconds without interaction before a model starts returning.
    #[schemars(title = "Idle Delay (ms)", range(min = 0, max = 10000))]
    pub idle_delay_ms: u64,
    /// Minimum |pitch| (radians) for the auto-return to engage.
    #[schemars(skip)]
    pub idle_threshold: f32,
    /// Fraction of pitch removed per frame while returning.
    #[schemars(title = "Return Rate", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub decay_rate: f32,
    /// |pitch| below which a returning model snaps to exactly zero.
    #[schemars(skip)]
    pub snap_epsilon: f32,
}

impl MotionOptions {
    /// Idle delay as a [`Duration`].
    #[must_use]
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            ease_factor: 0.1,
            idle_delay_ms: 1000,
            idle_threshold: 0.05,
            decay_rate: 0.05,
            snap_epsilon: 0.01,
        }
    }
}
