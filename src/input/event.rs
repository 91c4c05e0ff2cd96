use glam::Vec2;

/// Platform-agnostic input events.
///
/// Positions are logical pixels relative to the viewport's top-left
/// corner. Mouse and touch share the pointer variants; [`PointerKind`]
/// tells them apart where behaviour differs (swipe navigation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed or first finger down.
    PointerDown {
        /// Pointer position.
        position: Vec2,
        /// Mouse or touch.
        kind: PointerKind,
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        /// Pointer position.
        position: Vec2,
        /// Mouse or touch.
        kind: PointerKind,
    },
    /// Primary button released or last finger lifted.
    PointerUp {
        /// Pointer position.
        position: Vec2,
        /// Mouse or touch.
        kind: PointerKind,
    },
    /// Pointer left the viewport.
    PointerLeave,
    /// Viewport resized.
    Resize {
        /// Logical width.
        width: f32,
        /// Logical height.
        height: f32,
        /// Device pixels per logical pixel.
        pixel_ratio: f32,
    },
    /// Device rotated. Handled exactly like [`InputEvent::Resize`].
    OrientationChange {
        /// Logical width after rotation.
        width: f32,
        /// Logical height after rotation.
        height: f32,
        /// Device pixels per logical pixel.
        pixel_ratio: f32,
    },
    /// Step the single-mode selection.
    Navigate(NavDirection),
}

/// What produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen.
    Mouse,
    /// Touch screen.
    Touch {
        /// Fingers currently on the surface.
        contacts: u8,
    },
}

impl PointerKind {
    /// Single-finger touch.
    pub const SINGLE_TOUCH: Self = Self::Touch { contacts: 1 };

    /// Whether this is a touch with exactly one contact.
    #[must_use]
    pub fn is_single_touch(self) -> bool {
        matches!(self, Self::Touch { contacts: 1 })
    }
}

/// Direction for [`InputEvent::Navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// Towards slot 0.
    Previous,
    /// Towards the last slot.
    Next,
}

#[cfg(feature = "viewer")]
impl NavDirection {
    /// Arrow keys step the selection.
    #[must_use]
    pub fn from_key(key: &winit::keyboard::Key) -> Option<Self> {
        use winit::keyboard::{Key, NamedKey};
        match key {
            Key::Named(NamedKey::ArrowLeft) => Some(Self::Previous),
            Key::Named(NamedKey::ArrowRight) => Some(Self::Next),
            _ => None,
        }
    }
}
