//! Cooperative frame callbacks and host listener bookkeeping.
//!
//! The host owns the real refresh signal (`requestAnimationFrame`, a winit
//! redraw, a test loop). Callbacks are one-shot: each tick must request the
//! next frame again, so cancelling a callback is enough to stop its loop.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::input::InputEvent;

/// The independent per-frame loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameCallback {
    /// Decay, ease, draw.
    Viewport,
    /// Text scroll.
    Marquee,
}

impl FrameCallback {
    /// Dispatch order within one refresh.
    pub const ALL: [Self; 2] = [Self::Viewport, Self::Marquee];
}

/// Handle of one pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

/// One-shot frame request table.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: FxHashMap<FrameCallback, FrameRequestId>,
}

impl FrameScheduler {
    /// Empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `callback` to run on the next frame. A callback has at most
    /// one pending request; asking again replaces it.
    pub fn request(&mut self, callback: FrameCallback) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        let _ = self.pending.insert(callback, id);
        id
    }

    /// Drop a pending request. Returns whether one existed.
    pub fn cancel(&mut self, callback: FrameCallback) -> bool {
        self.pending.remove(&callback).is_some()
    }

    /// Whether `callback` will run next frame.
    #[must_use]
    pub fn is_pending(&self, callback: FrameCallback) -> bool {
        self.pending.contains_key(&callback)
    }

    /// Pending request id for `callback`.
    #[must_use]
    pub fn request_id(&self, callback: FrameCallback) -> Option<FrameRequestId> {
        self.pending.get(&callback).copied()
    }

    /// Consume the requests due this frame, in dispatch order.
    pub fn take_due(&mut self) -> Vec<FrameCallback> {
        FrameCallback::ALL
            .into_iter()
            .filter(|cb| self.pending.remove(cb).is_some())
            .collect()
    }
}

/// Host event subscriptions the showcase depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Press on the viewport.
    PointerDown,
    /// Pointer travel.
    PointerMove,
    /// Release anywhere.
    PointerUp,
    /// Pointer left the viewport.
    PointerLeave,
    /// Window resize.
    Resize,
    /// Device rotation.
    OrientationChange,
    /// Arrow buttons / keys.
    Navigate,
}

impl Listener {
    /// Everything a mounted showcase listens to.
    pub const ALL: [Self; 7] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerLeave,
        Self::Resize,
        Self::OrientationChange,
        Self::Navigate,
    ];

    /// Subscription an event arrives through.
    #[must_use]
    pub fn for_event(event: &InputEvent) -> Self {
        match event {
            InputEvent::PointerDown { .. } => Self::PointerDown,
            InputEvent::PointerMove { .. } => Self::PointerMove,
            InputEvent::PointerUp { .. } => Self::PointerUp,
            InputEvent::PointerLeave => Self::PointerLeave,
            InputEvent::Resize { .. } => Self::Resize,
            InputEvent::OrientationChange { .. } => Self::OrientationChange,
            InputEvent::Navigate(_) => Self::Navigate,
        }
    }
}

/// Registered host listeners. Events arriving through an unregistered
/// listener are dropped.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: FxHashSet<Listener>,
}

impl ListenerRegistry {
    /// Subscribe. Returns `false` if already registered.
    pub fn register(&mut self, listener: Listener) -> bool {
        self.active.insert(listener)
    }

    /// Whether `listener` is active.
    #[must_use]
    pub fn is_registered(&self, listener: Listener) -> bool {
        self.active.contains(&listener)
    }

    /// Number of active listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Remove everything; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.active.len();
        self.active.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_one_shot() {
        let mut s = FrameScheduler::new();
        let _ = s.request(FrameCallback::Marquee);
        let _ = s.request(FrameCallback::Viewport);
        assert_eq!(
            s.take_due(),
            vec![FrameCallback::Viewport, FrameCallback::Marquee]
        );
        assert!(s.take_due().is_empty());
    }

    #[test]
    fn re_request_replaces() {
        let mut s = FrameScheduler::new();
        let a = s.request(FrameCallback::Viewport);
        let b = s.request(FrameCallback::Viewport);
        assert_ne!(a, b);
        assert_eq!(s.request_id(FrameCallback::Viewport), Some(b));
        assert_eq!(s.take_due().len(), 1);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let mut s = FrameScheduler::new();
        let _ = s.request(FrameCallback::Viewport);
        let _ = s.request(FrameCallback::Marquee);
        assert!(s.cancel(FrameCallback::Viewport));
        assert!(!s.cancel(FrameCallback::Viewport));
        assert_eq!(s.take_due(), vec![FrameCallback::Marquee]);
    }

    #[test]
    fn registry_clear_counts() {
        let mut r = ListenerRegistry::default();
        for l in Listener::ALL {
            assert!(r.register(l));
        }
        assert!(!r.register(Listener::Resize));
        assert_eq!(r.clear(), Listener::ALL.len());
        assert!(r.is_empty());
    }
}
