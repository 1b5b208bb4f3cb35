//! Polled keyboard/mouse input turned into per-tick callbacks.

mod binding;
mod dispatcher;
mod phase;

pub use binding::{
    KeyBinding, KeyCallback, MouseButtonCallback, MouseMoveCallback, MouseScrollCallback,
};
pub use dispatcher::InputDispatcher;
pub use phase::KeyPhase;
