use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Platform-independent key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// How the cursor behaves while the window has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    /// Visible and free to leave the window
    #[default]
    Normal,
    /// Invisible over the window but not confined
    Hidden,
    /// Invisible and locked; positions become virtual and unbounded
    Disabled,
}

/// Kinds of input the platform pushes instead of exposing for polling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushEventKind {
    Scroll,
    MouseButton,
}

/// Edge-triggered input queued by a source until the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushEvent {
    /// Vertical scroll offset, positive away from the user
    Scroll(f32),
    MouseButton { button: MouseButton, pressed: bool },
}

impl PushEvent {
    pub fn kind(&self) -> PushEventKind {
        match self {
            PushEvent::Scroll(_) => PushEventKind::Scroll,
            PushEvent::MouseButton { .. } => PushEventKind::MouseButton,
        }
    }
}

/// Controller - the window/input layer polled once per tick
pub trait Controller {
    /// Check if key is currently down
    fn is_down(&self, key: Key) -> bool;

    /// Absolute cursor position, if the source has seen one yet
    fn cursor_position(&self) -> Option<Vec2>;

    /// Monotonic time in seconds
    fn time(&self) -> f64;

    /// Confine, hide or release the cursor
    fn set_cursor_mode(&mut self, mode: CursorMode);

    /// Start or stop queueing push events of `kind`
    fn set_subscribed(&mut self, kind: PushEventKind, subscribed: bool);

    /// Move every queued push event into `out`, oldest first
    fn take_events(&mut self, out: &mut Vec<PushEvent>);
}
