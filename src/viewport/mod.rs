//! Viewport and device adapter.
//!
//! Captures the host surface size and pixel ratio, and classifies the
//! device as desktop or mobile. Capability detection is injected through
//! [`DeviceEnvironment`] so classification is testable and never depends
//! on a user-agent string.

use glam::Vec2;

/// Primary input method the device reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputModality {
    /// Mouse or trackpad.
    #[default]
    Pointer,
    /// Touch screen.
    Touch,
}

/// Layout class derived from device and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    /// Row of all models.
    #[default]
    Desktop,
    /// One model at a time.
    Mobile,
}

/// Device capabilities supplied by the host.
pub trait DeviceEnvironment {
    /// How the user primarily points.
    fn input_modality(&self) -> InputModality;
    /// Whether the device is a phone or tablet regardless of width.
    fn is_handheld(&self) -> bool;
}

/// Capabilities known at compile time for the target platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEnvironment;

impl DeviceEnvironment for NativeEnvironment {
    fn input_modality(&self) -> InputModality {
        if self.is_handheld() {
            InputModality::Touch
        } else {
            InputModality::Pointer
        }
    }

    fn is_handheld(&self) -> bool {
        cfg!(any(target_os = "android", target_os = "ios"))
    }
}

/// Explicit capabilities, for hosts that detect them at runtime and for
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedEnvironment {
    /// Reported input modality.
    pub modality: InputModality,
    /// Reported handheld flag.
    pub handheld: bool,
}

impl FixedEnvironment {
    /// Desktop with a mouse.
    pub const DESKTOP: Self = Self {
        modality: InputModality::Pointer,
        handheld: false,
    };
    /// Phone with a touch screen.
    pub const PHONE: Self = Self {
        modality: InputModality::Touch,
        handheld: true,
    };
}

impl DeviceEnvironment for FixedEnvironment {
    fn input_modality(&self) -> InputModality {
        self.modality
    }

    fn is_handheld(&self) -> bool {
        self.handheld
    }
}

/// Current viewport size and device classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f32,
    /// Input modality at classification time.
    pub modality: InputModality,
    /// Desktop or mobile layout.
    pub class: DeviceClass,
}

impl ViewportState {
    /// Classify a viewport. Mobile when the device is handheld or the width
    /// is below `mobile_breakpoint`.
    #[must_use]
    pub fn classify(
        width: f32,
        height: f32,
        pixel_ratio: f32,
        env: &dyn DeviceEnvironment,
        mobile_breakpoint: f32,
    ) -> Self {
        let class = if env.is_handheld() || width < mobile_breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        };
        Self {
            width,
            height,
            pixel_ratio,
            modality: env.input_modality(),
            class,
        }
    }

    /// Whether the single-model layout applies.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.class == DeviceClass::Mobile
    }

    /// Width over height, 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel ratio used for the render target, capped at `max`.
    #[must_use]
    pub fn render_pixel_ratio(&self, max: f32) -> f32 {
        self.pixel_ratio.clamp(1.0, max.max(1.0))
    }

    /// Render target size in physical pixels, at least 1×1.
    #[must_use]
    pub fn physical_size(&self, max_pixel_ratio: f32) -> (u32, u32) {
        let ratio = self.render_pixel_ratio(max_pixel_ratio);
        let to_px = |v: f32| ((v * ratio).round() as u32).max(1);
        (to_px(self.width), to_px(self.height))
    }

    /// Logical pixel position to normalized device coordinates (`y` up).
    #[must_use]
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new(2.0 * position.x / w - 1.0, 1.0 - 2.0 * position.y / h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINT: f32 = 700.0;

    #[test]
    fn wide_desktop_uses_row_layout() {
        let v = ViewportState::classify(
            1920.0,
            1080.0,
            1.0,
            &FixedEnvironment::DESKTOP,
            BREAKPOINT,
        );
        assert_eq!(v.class, DeviceClass::Desktop);
        assert!((v.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn phone_portrait_is_mobile() {
        let v = ViewportState::classify(
            375.0,
            812.0,
            3.0,
            &FixedEnvironment::PHONE,
            BREAKPOINT,
        );
        assert!(v.is_mobile());
        assert_eq!(v.modality, InputModality::Touch);
        assert_eq!(v.render_pixel_ratio(2.0), 2.0);
        assert_eq!(v.physical_size(2.0), (750, 1624));
    }

    #[test]
    fn narrow_desktop_window_is_mobile() {
        let v = ViewportState::classify(
            500.0,
            900.0,
            1.0,
            &FixedEnvironment::DESKTOP,
            BREAKPOINT,
        );
        assert!(v.is_mobile());
    }

    #[test]
    fn handheld_tablet_stays_mobile_when_wide() {
        let tablet = FixedEnvironment {
            modality: InputModality::Touch,
            handheld: true,
        };
        let v = ViewportState::classify(1024.0, 768.0, 2.0, &tablet, BREAKPOINT);
        assert!(v.is_mobile());
    }

    #[test]
    fn ndc_corners() {
        let v = ViewportState::classify(
            800.0,
            600.0,
            1.0,
            &FixedEnvironment::DESKTOP,
            BREAKPOINT,
        );
        assert_eq!(v.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(v.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(v.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn degenerate_size_is_safe() {
        let v = ViewportState::classify(
            0.0,
            0.0,
            1.0,
            &FixedEnvironment::DESKTOP,
            BREAKPOINT,
        );
        assert_eq!(v.aspect(), 1.0);
        assert_eq!(v.physical_size(2.0), (1, 1));
    }
}
