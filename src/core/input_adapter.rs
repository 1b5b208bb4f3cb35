use std::collections::HashSet;
use std::sync::Arc;

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use super::clock::Stopwatch;
use super::controller::{Controller, CursorMode, Key, MouseButton, PushEvent, PushEventKind};

/// Pixels of trackpad scroll that count as one wheel notch
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug)]
pub struct WinitController {
    /// Window the cursor mode is applied to
    window: Option<Arc<Window>>,
    /// Currently held keys
    keys_down: HashSet<Key>,
    /// Absolute cursor position; virtual while the cursor is disabled
    cursor_position: Option<Vec2>,
    cursor_mode: CursorMode,
    scroll_subscribed: bool,
    button_subscribed: bool,
    /// Push events waiting for the next tick
    queued: Vec<PushEvent>,
    stopwatch: Stopwatch,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys and no window
    pub fn new() -> Self {
        Self {
            window: None,
            keys_down: HashSet::new(),
            cursor_position: None,
            cursor_mode: CursorMode::Normal,
            scroll_subscribed: false,
            button_subscribed: false,
            queued: Vec::new(),
            stopwatch: Stopwatch::new(),
        }
    }

    /// Attach the window and apply the current cursor mode to it
    pub fn attach_window(&mut self, window: Arc<Window>) {
        self.window = Some(window);
        self.apply_cursor_mode();
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(key) = Self::keycode_to_key(keycode) {
                        match event.state {
                            ElementState::Pressed => {
                                self.keys_down.insert(key);
                            }
                            ElementState::Released => {
                                self.keys_down.remove(&key);
                            }
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if self.button_subscribed {
                    self.queued.push(PushEvent::MouseButton {
                        button: Self::mouse_button_to_button(*button),
                        pressed: state.is_pressed(),
                    });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if self.scroll_subscribed {
                    let offset = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(position) => {
                            position.y as f32 / PIXELS_PER_SCROLL_LINE
                        }
                    };
                    self.queued.push(PushEvent::Scroll(offset));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.cursor_mode != CursorMode::Disabled {
                    self.cursor_position = Some(Vec2::new(position.x as f32, position.y as f32));
                }
            }
            WindowEvent::Focused(false) => {
                // Releases are never delivered to an unfocused window
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    /// Process raw device events; relative motion drives the virtual cursor
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.cursor_mode == CursorMode::Disabled {
                let motion = Vec2::new(delta.0 as f32, delta.1 as f32);
                let position = self.cursor_position.unwrap_or(Vec2::ZERO);
                self.cursor_position = Some(position + motion);
            }
        }
    }

    fn apply_cursor_mode(&self) {
        let Some(window) = &self.window else {
            return;
        };

        match self.cursor_mode {
            CursorMode::Normal => {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                    log::warn!("Failed to release cursor: {}", e);
                }
                window.set_cursor_visible(true);
            }
            CursorMode::Hidden => {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                    log::warn!("Failed to release cursor: {}", e);
                }
                window.set_cursor_visible(false);
            }
            CursorMode::Disabled => {
                let grabbed = window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                if let Err(e) = grabbed {
                    log::warn!("Failed to grab cursor: {}", e);
                }
                window.set_cursor_visible(false);
            }
        }
    }

    /// Map Winit KeyCode to Key
    fn keycode_to_key(keycode: KeyCode) -> Option<Key> {
        let key = match keycode {
            KeyCode::KeyA => Key::KeyA,
            KeyCode::KeyB => Key::KeyB,
            KeyCode::KeyC => Key::KeyC,
            KeyCode::KeyD => Key::KeyD,
            KeyCode::KeyE => Key::KeyE,
            KeyCode::KeyF => Key::KeyF,
            KeyCode::KeyG => Key::KeyG,
            KeyCode::KeyH => Key::KeyH,
            KeyCode::KeyI => Key::KeyI,
            KeyCode::KeyJ => Key::KeyJ,
            KeyCode::KeyK => Key::KeyK,
            KeyCode::KeyL => Key::KeyL,
            KeyCode::KeyM => Key::KeyM,
            KeyCode::KeyN => Key::KeyN,
            KeyCode::KeyO => Key::KeyO,
            KeyCode::KeyP => Key::KeyP,
            KeyCode::KeyQ => Key::KeyQ,
            KeyCode::KeyR => Key::KeyR,
            KeyCode::KeyS => Key::KeyS,
            KeyCode::KeyT => Key::KeyT,
            KeyCode::KeyU => Key::KeyU,
            KeyCode::KeyV => Key::KeyV,
            KeyCode::KeyW => Key::KeyW,
            KeyCode::KeyX => Key::KeyX,
            KeyCode::KeyY => Key::KeyY,
            KeyCode::KeyZ => Key::KeyZ,
            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::Space => Key::Space,
            KeyCode::Enter => Key::Enter,
            KeyCode::Escape => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::ShiftLeft => Key::ShiftLeft,
            KeyCode::ShiftRight => Key::ShiftRight,
            KeyCode::ControlLeft => Key::ControlLeft,
            KeyCode::ControlRight => Key::ControlRight,
            KeyCode::AltLeft => Key::AltLeft,
            KeyCode::AltRight => Key::AltRight,
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            _ => return None,
        };
        Some(key)
    }

    /// Map Winit MouseButton to MouseButton
    fn mouse_button_to_button(button: winit::event::MouseButton) -> MouseButton {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::Back,
            winit::event::MouseButton::Forward => MouseButton::Forward,
            winit::event::MouseButton::Other(id) => MouseButton::Other(id),
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_position
    }

    fn time(&self) -> f64 {
        self.stopwatch.elapsed()
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        log::debug!("Cursor mode {:?} -> {:?}", self.cursor_mode, mode);
        self.cursor_mode = mode;
        self.apply_cursor_mode();
    }

    fn set_subscribed(&mut self, kind: PushEventKind, subscribed: bool) {
        match kind {
            PushEventKind::Scroll => self.scroll_subscribed = subscribed,
            PushEventKind::MouseButton => self.button_subscribed = subscribed,
        }
        if !subscribed {
            self.queued.retain(|event| event.kind() != kind);
        }
    }

    fn take_events(&mut self, out: &mut Vec<PushEvent>) {
        out.append(&mut self.queued);
    }
}
