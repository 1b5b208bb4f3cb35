//! The fly-through's application state and its default input wiring.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::ControlSettings;
use crate::core::{Controller, MouseButton};
use crate::input::{InputDispatcher, KeyBinding};

/// Everything the input callbacks are allowed to touch
#[derive(Debug, Clone)]
pub struct FlyState {
    pub camera: Camera,
    /// Units per second
    pub camera_speed: f32,
    /// Blend of the box colours toward white, 0..1
    pub mix: f32,
    pub wireframe: bool,
    pub should_close: bool,
    /// Field of view to return to when the zoom button is let go
    zoom_restore: Option<f32>,
}

impl FlyState {
    pub fn new(camera: Camera, camera_speed: f32) -> Self {
        Self {
            camera,
            camera_speed,
            mix: 0.2,
            wireframe: false,
            should_close: false,
            zoom_restore: None,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom_restore.is_some()
    }

    fn zoom(&mut self, pressed: bool, zoom_field_of_view: f32) {
        if pressed {
            if self.zoom_restore.is_none() {
                self.zoom_restore = Some(self.camera.field_of_view());
                self.camera.set_field_of_view(zoom_field_of_view);
            }
        } else if let Some(field_of_view) = self.zoom_restore.take() {
            self.camera.set_field_of_view(field_of_view);
        }
    }
}

fn movement(direction: Vec3) -> KeyBinding<FlyState> {
    KeyBinding::new().on_held(move |state: &mut FlyState, delta| {
        let step = direction * delta * state.camera_speed;
        state.camera.move_local(step);
    })
}

fn roll(degrees_per_second: f32) -> KeyBinding<FlyState> {
    KeyBinding::new().on_held(move |state: &mut FlyState, delta| {
        state.camera.roll(degrees_per_second * delta * state.camera_speed);
    })
}

fn change_mix(rate: f32) -> KeyBinding<FlyState> {
    KeyBinding::new().on_held(move |state: &mut FlyState, delta| {
        state.mix = (state.mix + rate * delta).clamp(0.0, 1.0);
    })
}

/// Bind the key map, mouse look, scroll zoom and the zoom button
pub fn install_controls<C: Controller>(
    input: &mut InputDispatcher<FlyState, C>,
    controls: &ControlSettings,
) {
    let keys = &controls.keys;

    input.register_key_binding(keys.forward, movement(Vec3::Z));
    input.register_key_binding(keys.backward, movement(Vec3::NEG_Z));
    input.register_key_binding(keys.left, movement(Vec3::NEG_X));
    input.register_key_binding(keys.right, movement(Vec3::X));
    input.register_key_binding(keys.up, movement(Vec3::Y));
    input.register_key_binding(keys.down, movement(Vec3::NEG_Y));

    input.register_key_binding(keys.roll_left, roll(-controls.roll_speed));
    input.register_key_binding(keys.roll_right, roll(controls.roll_speed));

    input.register_key_binding(keys.mix_up, change_mix(controls.mix_rate));
    input.register_key_binding(keys.mix_down, change_mix(-controls.mix_rate));

    let (base_speed, boost_speed) = (controls.base_speed, controls.boost_speed);
    input.register_key_binding(
        keys.boost,
        KeyBinding::new()
            .on_pressed(move |state: &mut FlyState, _| state.camera_speed = boost_speed)
            .on_released(move |state: &mut FlyState, _| state.camera_speed = base_speed),
    );

    input.register_key_binding(
        keys.wireframe,
        KeyBinding::new()
            .on_pressed(|state: &mut FlyState, _| state.wireframe = true)
            .on_released(|state: &mut FlyState, _| state.wireframe = false),
    );

    input.register_key_binding(
        keys.reset_rotation,
        KeyBinding::new().on_released(|state: &mut FlyState, _| state.camera.reset_rotation()),
    );

    input.register_key_binding(
        keys.quit,
        KeyBinding::new().on_pressed(|state: &mut FlyState, _| state.should_close = true),
    );

    let sensitivity = Vec2::from_array(controls.mouse_sensitivity);
    input.set_mouse_move_callback(Some(Box::new(
        move |state: &mut FlyState, delta: Vec2, _position: Vec2| {
            let rotation = delta * sensitivity;
            state.camera.yaw(rotation.x);
            // Screen y grows downward
            state.camera.pitch(-rotation.y);
        },
    )));

    let scroll_step = controls.scroll_step;
    input.set_mouse_scroll_callback(Some(Box::new(move |state: &mut FlyState, offset: f32| {
        state.camera.change_field_of_view(-offset * scroll_step);
    })));

    let (zoom_button, zoom_field_of_view) = (controls.zoom_button, controls.zoom_field_of_view);
    input.set_mouse_button_callback(Some(Box::new(
        move |state: &mut FlyState, button: MouseButton, pressed: bool| {
            if button == zoom_button {
                state.zoom(pressed, zoom_field_of_view);
            }
        },
    )));

    log::debug!("Installed {} key bindings", input.tracked_keys().count());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_restores_previous_field_of_view() {
        let mut state = FlyState::new(Camera::default(), 2.0);
        let before = state.camera.field_of_view();

        state.zoom(true, 20.0);
        assert!(state.is_zoomed());
        assert_eq!(state.camera.field_of_view(), 20.0);

        // A second press while zoomed must not overwrite the restore point
        state.zoom(true, 20.0);
        state.zoom(false, 20.0);
        assert!(!state.is_zoomed());
        assert_eq!(state.camera.field_of_view(), before);
    }

    #[test]
    fn release_without_press_is_harmless() {
        let mut state = FlyState::new(Camera::default(), 2.0);
        state.zoom(false, 20.0);
        assert_eq!(state.camera.field_of_view(), Camera::default().field_of_view());
    }
}
