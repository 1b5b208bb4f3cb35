use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::{Mat4, Vec3};

/// Half extent of the cube the boxes are scattered in
pub const FIELD_HALF_EXTENT: f32 = 50.0;
pub const MAX_BOX_SCALE: f32 = 2.0;

/// One box of the field; `rotation` holds per-axis angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxInstance {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Vec3,
    pub color: Vec3,
}

impl BoxInstance {
    /// translate * rotX * rotY * rotZ * scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Deterministic values in [0, 1) keyed by seed and index
struct Scatter {
    seed: u64,
}

impl Scatter {
    fn unit(&self, index: usize, channel: u32) -> f32 {
        let mut hasher = DefaultHasher::new();
        (self.seed, index, channel).hash(&mut hasher);
        // Top 24 bits fit an f32 mantissa exactly
        (hasher.finish() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn vec3(&self, index: usize, channel: u32) -> Vec3 {
        Vec3::new(
            self.unit(index, channel),
            self.unit(index, channel + 1),
            self.unit(index, channel + 2),
        )
    }
}

/// Scatter `count` boxes through the field
///
/// With at least two boxes the first becomes a huge shell around the origin
/// and the last a distant landmark.
pub fn create_boxes(count: usize, seed: u64) -> Vec<BoxInstance> {
    let scatter = Scatter { seed };

    let mut boxes: Vec<BoxInstance> = (0..count)
        .map(|i| BoxInstance {
            position: scatter.vec3(i, 0) * (2.0 * FIELD_HALF_EXTENT) - Vec3::splat(FIELD_HALF_EXTENT),
            scale: scatter.unit(i, 3) * MAX_BOX_SCALE,
            // Angles are drawn from [0, 360) but used as radians
            rotation: scatter.vec3(i, 4) * 360.0,
            color: scatter.vec3(i, 7),
        })
        .collect();

    if boxes.len() >= 2 {
        if let Some(sky) = boxes.first_mut() {
            sky.position = Vec3::ZERO;
            sky.scale = 5000.0;
        }
        if let Some(landmark) = boxes.last_mut() {
            landmark.position = Vec3::splat(1000.0);
            landmark.scale = 1000.0;
        }
    }

    log::info!("Scene created: {} boxes (seed {})", boxes.len(), seed);
    boxes
}
