//! Auto-scrolling text marquee.
//!
//! Runs on its own frame callback, independent of the 3D viewport. The
//! host renders the track (two copies of the text back to back), measures
//! its width, and applies the returned horizontal offset.

use crate::options::MarqueeOptions;

/// Smallest responsive font size, rem.
const MIN_FONT_REM: f32 = 2.0;
/// Largest responsive font size, rem.
const MAX_FONT_REM: f32 = 5.0;

/// Scroll speed (px per frame) for a viewport width.
#[must_use]
pub fn speed_for_width(options: &MarqueeOptions, width: f32) -> f32 {
    if width < options.narrow_breakpoint {
        options.narrow_speed
    } else if width < options.medium_breakpoint {
        options.medium_speed
    } else {
        options.wide_speed
    }
}

/// Marquee font size in rem: 5% of the smaller viewport side, clamped.
#[must_use]
pub fn font_size_rem(width: f32, height: f32) -> f32 {
    (width.min(height) / 100.0 * 5.0).clamp(MIN_FONT_REM, MAX_FONT_REM)
}

/// Per-frame marquee state.
#[derive(Debug, Clone)]
pub struct MarqueeDriver {
    options: MarqueeOptions,
    offset: f32,
    speed: f32,
}

impl MarqueeDriver {
    /// Driver at offset 0 with the speed tier for `viewport_width`.
    #[must_use]
    pub fn new(options: MarqueeOptions, viewport_width: f32) -> Self {
        let speed = speed_for_width(&options, viewport_width);
        Self {
            options,
            offset: 0.0,
            speed,
        }
    }

    /// Re-select the speed tier after a resize.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.speed = speed_for_width(&self.options, width);
    }

    /// Current speed, px per frame.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current offset, px (zero or negative).
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance one frame. `content_width` is the measured width of the
    /// doubled track; the offset wraps after half of it.
    pub fn tick(&mut self, content_width: f32) -> f32 {
        self.offset -= self.speed;
        if self.offset.abs() >= content_width * 0.5 {
            self.offset = 0.0;
        }
        self.offset
    }
}
