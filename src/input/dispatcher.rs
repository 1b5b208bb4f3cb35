use glam::Vec2;

use crate::core::{Clock, Controller, CursorMode, Key, PushEvent, PushEventKind};

use super::binding::{KeyBinding, MouseButtonCallback, MouseMoveCallback, MouseScrollCallback};
use super::phase::KeyPhase;

/// A key with at least one callback, and where it is in the state machine
struct TrackedKey<S> {
    key: Key,
    phase: KeyPhase,
    binding: KeyBinding<S>,
}

/// Turns polled input into pressed/held/released callbacks once per tick
///
/// The dispatcher owns its input source and its callbacks but never the
/// application state: that is lent to [`InputDispatcher::update`] and handed
/// to every callback by mutable reference. Nothing is global, so several
/// dispatchers (each with its own source) can coexist.
pub struct InputDispatcher<S, C: Controller> {
    source: C,
    /// Registration order is delivery order
    keys: Vec<TrackedKey<S>>,
    mouse_move: Option<MouseMoveCallback<S>>,
    mouse_scroll: Option<MouseScrollCallback<S>>,
    mouse_button: Option<MouseButtonCallback<S>>,
    last_mouse_position: Option<Vec2>,
    clock: Clock,
    delta_time: f32,
    pending: Vec<PushEvent>,
}

impl<S, C: Controller> InputDispatcher<S, C> {
    /// Take over `source` and disable its cursor for free-look
    pub fn new(source: C) -> Self {
        Self::with_cursor_mode(source, CursorMode::Disabled)
    }

    pub fn with_cursor_mode(mut source: C, mode: CursorMode) -> Self {
        source.set_cursor_mode(mode);
        Self {
            source,
            keys: Vec::new(),
            mouse_move: None,
            mouse_scroll: None,
            mouse_button: None,
            last_mouse_position: None,
            clock: Clock::new(),
            delta_time: 0.0,
            pending: Vec::new(),
        }
    }

    /// Replace the binding for `key`; an empty binding stops tracking it
    pub fn register_key_binding(&mut self, key: Key, binding: KeyBinding<S>) {
        let existing = self.keys.iter().position(|tracked| tracked.key == key);

        match (existing, binding.is_empty()) {
            (Some(index), true) => {
                self.keys.remove(index);
                log::debug!("Unbound {:?}", key);
            }
            (Some(index), false) => {
                self.keys[index].binding = binding;
                log::debug!("Rebound {:?}: {:?}", key, self.keys[index].binding);
            }
            (None, false) => {
                log::debug!("Bound {:?}: {:?}", key, binding);
                self.keys.push(TrackedKey {
                    key,
                    phase: KeyPhase::Idle,
                    binding,
                });
            }
            (None, true) => {}
        }
    }

    /// Replace the mouse-move handler; `None` disables delivery
    pub fn set_mouse_move_callback(&mut self, callback: Option<MouseMoveCallback<S>>) {
        self.mouse_move = callback;
        // The next sample seeds the position again
        self.last_mouse_position = None;
    }

    /// Replace the scroll handler and (un)subscribe the source's scroll events
    pub fn set_mouse_scroll_callback(&mut self, callback: Option<MouseScrollCallback<S>>) {
        self.source
            .set_subscribed(PushEventKind::Scroll, callback.is_some());
        self.mouse_scroll = callback;
    }

    /// Replace the button handler and (un)subscribe the source's button edges
    pub fn set_mouse_button_callback(&mut self, callback: Option<MouseButtonCallback<S>>) {
        self.source
            .set_subscribed(PushEventKind::MouseButton, callback.is_some());
        self.mouse_button = callback;
    }

    /// Run one tick and return its delta time in seconds
    ///
    /// Order: delta time, queued scroll/button events, tracked keys in
    /// registration order, then mouse motion.
    pub fn update(&mut self, state: &mut S) -> f32 {
        let delta = self.clock.tick(self.source.time());
        self.delta_time = delta;

        self.dispatch_push_events(state);

        for tracked in &mut self.keys {
            tracked.phase = tracked.phase.next(self.source.is_down(tracked.key));
            if let Some(callback) = tracked.binding.callback_for(tracked.phase) {
                callback(state, delta);
            }
        }

        if let Some(callback) = &mut self.mouse_move {
            if let Some(position) = self.source.cursor_position() {
                match self.last_mouse_position.replace(position) {
                    Some(last) => callback(state, position - last, position),
                    None => log::trace!("Seeded cursor at {}", position),
                }
            }
        }

        delta
    }

    fn dispatch_push_events(&mut self, state: &mut S) {
        self.source.take_events(&mut self.pending);

        for event in self.pending.drain(..) {
            match event {
                PushEvent::Scroll(offset) => {
                    if let Some(callback) = &mut self.mouse_scroll {
                        callback(state, offset);
                    }
                }
                PushEvent::MouseButton { button, pressed } => {
                    if let Some(callback) = &mut self.mouse_button {
                        callback(state, button, pressed);
                    }
                }
            }
        }
    }

    /// Drop every binding and callback and unsubscribe push events
    pub fn reset(&mut self) {
        log::debug!("Input reset, dropping {} key bindings", self.keys.len());

        self.keys.clear();
        self.mouse_move = None;
        self.set_mouse_scroll_callback(None);
        self.set_mouse_button_callback(None);
        self.last_mouse_position = None;

        // Anything queued before the unsubscribe belongs to the old owner
        self.source.take_events(&mut self.pending);
        self.pending.clear();
    }

    /// Tracked keys in delivery order
    pub fn tracked_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().map(|tracked| tracked.key)
    }

    /// Current phase of a tracked key
    pub fn phase(&self, key: Key) -> Option<KeyPhase> {
        self.keys
            .iter()
            .find(|tracked| tracked.key == key)
            .map(|tracked| tracked.phase)
    }

    /// Delta time of the last tick
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }
}
