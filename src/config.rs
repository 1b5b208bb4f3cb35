//! Settings file, loaded from JSON. Every section is `#[serde(default)]`, so
//! a file that only overrides `controls.base_speed` is valid.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraConvention, Projection};
use crate::core::{Key, MouseButton};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub controls: ControlSettings,
    pub scene: SceneSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    /// Logical pixels
    pub width: u32,
    pub height: u32,
    /// Hide and lock the cursor for mouse look
    pub lock_cursor: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "freefly".to_string(),
            width: 1600,
            height: 1200,
            lock_cursor: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
    /// Vertical, degrees
    pub field_of_view: f32,
    pub near: f32,
    pub far: f32,
    pub convention: CameraConvention,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            field_of_view: 75.0,
            near: 0.1,
            far: 10_000.0,
            convention: CameraConvention::default(),
        }
    }
}

impl CameraSettings {
    pub fn build(&self, aspect_ratio: f32) -> Camera {
        Camera::new(
            Vec3::from_array(self.position),
            Vec3::from_array(self.forward),
            Vec3::from_array(self.up),
        )
        .with_convention(self.convention)
        .with_projection(Projection {
            field_of_view: self.field_of_view,
            aspect_ratio,
            near: self.near,
            far: self.far,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Units per second
    pub base_speed: f32,
    /// Speed while the boost key is held
    pub boost_speed: f32,
    /// Degrees per second per unit of speed
    pub roll_speed: f32,
    /// Degrees per pixel of mouse travel, x then y
    pub mouse_sensitivity: [f32; 2],
    /// Degrees of field of view per scroll notch
    pub scroll_step: f32,
    /// Field of view while the zoom button is held
    pub zoom_field_of_view: f32,
    pub zoom_button: MouseButton,
    /// Colour mix change per second
    pub mix_rate: f32,
    pub keys: KeyMap,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            base_speed: 2.0,
            boost_speed: 10.0,
            roll_speed: 10.0,
            mouse_sensitivity: [0.1, 0.1],
            scroll_step: 1.0,
            zoom_field_of_view: 20.0,
            zoom_button: MouseButton::Right,
            mix_rate: 1.0,
            keys: KeyMap::default(),
        }
    }
}

/// Which key triggers which action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMap {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub up: Key,
    pub down: Key,
    pub roll_left: Key,
    pub roll_right: Key,
    pub boost: Key,
    pub mix_up: Key,
    pub mix_down: Key,
    pub wireframe: Key,
    pub reset_rotation: Key,
    pub quit: Key,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            forward: Key::KeyW,
            backward: Key::KeyS,
            left: Key::KeyA,
            right: Key::KeyD,
            up: Key::Space,
            down: Key::KeyC,
            roll_left: Key::KeyQ,
            roll_right: Key::KeyE,
            boost: Key::ShiftLeft,
            mix_up: Key::ArrowUp,
            mix_down: Key::ArrowDown,
            wireframe: Key::Tab,
            reset_rotation: Key::KeyR,
            quit: Key::Escape,
        }
    }
}

impl KeyMap {
    /// (action, key) pairs in a stable order
    pub fn entries(&self) -> [(&'static str, Key); 14] {
        [
            ("forward", self.forward),
            ("backward", self.backward),
            ("left", self.left),
            ("right", self.right),
            ("up", self.up),
            ("down", self.down),
            ("roll_left", self.roll_left),
            ("roll_right", self.roll_right),
            ("boost", self.boost),
            ("mix_up", self.mix_up),
            ("mix_down", self.mix_down),
            ("wireframe", self.wireframe),
            ("reset_rotation", self.reset_rotation),
            ("quit", self.quit),
        ]
    }

    /// First pair of actions sharing a key, if any
    pub fn conflict(&self) -> Option<(&'static str, &'static str, Key)> {
        let mut seen: HashMap<Key, &'static str> = HashMap::new();
        for (action, key) in self.entries() {
            if let Some(previous) = seen.insert(key, action) {
                return Some((previous, action, key));
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub box_count: usize,
    pub seed: u64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            box_count: 8000,
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the demo cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            bail!(
                "window size must be non-zero, got {}x{}",
                self.window.width,
                self.window.height
            );
        }

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            bail!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near,
                camera.far
            );
        }
        if !camera.field_of_view.is_finite() {
            bail!("camera field_of_view must be finite");
        }

        let controls = &self.controls;
        for (name, speed) in [
            ("base_speed", controls.base_speed),
            ("boost_speed", controls.boost_speed),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                bail!("controls.{} must be positive, got {}", name, speed);
            }
        }
        if let Some((first, second, key)) = controls.keys.conflict() {
            bail!(
                "controls.keys.{} and controls.keys.{} are both bound to {:?}",
                first,
                second,
                key
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn default_key_map_has_no_conflicts() {
        assert_eq!(KeyMap::default().conflict(), None);
    }

    #[test]
    fn camera_settings_build_camera() {
        let camera = CameraSettings::default().build(2.0);
        assert_eq!(camera.position(), Vec3::ZERO);
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert_eq!(camera.field_of_view(), 75.0);
        assert_eq!(camera.aspect_ratio(), 2.0);
    }

    #[test]
    fn json_round_trips() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
