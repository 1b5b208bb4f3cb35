use glam::Vec2;

use crate::core::MouseButton;

use super::phase::KeyPhase;

/// Fired with the application state and the tick's delta time in seconds
pub type KeyCallback<S> = Box<dyn FnMut(&mut S, f32)>;

/// Fired with the cursor delta since last tick and the absolute position
pub type MouseMoveCallback<S> = Box<dyn FnMut(&mut S, Vec2, Vec2)>;

/// Fired with the vertical scroll offset
pub type MouseScrollCallback<S> = Box<dyn FnMut(&mut S, f32)>;

/// Fired on every button edge, `true` for press
pub type MouseButtonCallback<S> = Box<dyn FnMut(&mut S, MouseButton, bool)>;

/// Callbacks for one key; absent callbacks are no-ops
pub struct KeyBinding<S> {
    pub on_pressed: Option<KeyCallback<S>>,
    pub on_held: Option<KeyCallback<S>>,
    pub on_released: Option<KeyCallback<S>>,
}

impl<S> KeyBinding<S> {
    /// Binding with no callbacks; registering it unbinds the key
    pub fn new() -> Self {
        Self {
            on_pressed: None,
            on_held: None,
            on_released: None,
        }
    }

    pub fn on_pressed(mut self, callback: impl FnMut(&mut S, f32) + 'static) -> Self {
        self.on_pressed = Some(Box::new(callback));
        self
    }

    pub fn on_held(mut self, callback: impl FnMut(&mut S, f32) + 'static) -> Self {
        self.on_held = Some(Box::new(callback));
        self
    }

    pub fn on_released(mut self, callback: impl FnMut(&mut S, f32) + 'static) -> Self {
        self.on_released = Some(Box::new(callback));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_pressed.is_none() && self.on_held.is_none() && self.on_released.is_none()
    }

    /// Callback for the phase a key has just entered
    pub(crate) fn callback_for(&mut self, phase: KeyPhase) -> Option<&mut KeyCallback<S>> {
        match phase {
            KeyPhase::Pressed => self.on_pressed.as_mut(),
            KeyPhase::Held => self.on_held.as_mut(),
            KeyPhase::Released => self.on_released.as_mut(),
            KeyPhase::Idle => None,
        }
    }
}

impl<S> Default for KeyBinding<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for KeyBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBinding")
            .field("on_pressed", &self.on_pressed.is_some())
            .field("on_held", &self.on_held.is_some())
            .field("on_released", &self.on_released.is_some())
            .finish()
    }
}
