use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

pub const MIN_FIELD_OF_VIEW: f32 = 1.0;
pub const MAX_FIELD_OF_VIEW: f32 = 180.0;

pub const DEFAULT_FIELD_OF_VIEW: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

const CANONICAL_FORWARD: Vec3 = Vec3::NEG_Z;
const CANONICAL_UP: Vec3 = Vec3::Y;
const CANONICAL_RIGHT: Vec3 = Vec3::X;

/// Sign conventions for movement and rotation
///
/// With nothing inverted: positive yaw turns toward `right`, positive pitch
/// looks toward `up`, positive roll tilts `up` toward `right`, and a
/// positive local z offset moves along `forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConvention {
    pub invert_yaw: bool,
    pub invert_pitch: bool,
    pub invert_roll: bool,
    pub invert_forward: bool,
}

impl CameraConvention {
    fn sign(inverted: bool) -> f32 {
        if inverted {
            -1.0
        } else {
            1.0
        }
    }
}

/// Perspective parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            aspect_ratio: 4.0 / 3.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// Free-fly camera with an orthonormal forward/up/right frame
///
/// Every mutator recomputes the matrices it affects before returning, so
/// `view()` and `projection()` are plain reads.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    projection_params: Projection,
    convention: CameraConvention,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Camera at `position` looking along `forward` with `up` as the roof
    ///
    /// `forward` and `up` need not be unit length or exactly perpendicular;
    /// `up` is re-derived from the frame. Degenerate input falls back to the
    /// canonical basis.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position,
            forward: CANONICAL_FORWARD,
            up: CANONICAL_UP,
            right: CANONICAL_RIGHT,
            projection_params: Projection::default(),
            convention: CameraConvention::default(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };

        let forward = forward.normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        if forward != Vec3::ZERO && right != Vec3::ZERO {
            camera.forward = forward;
            camera.right = right;
            camera.up = right.cross(forward).normalize();
        }

        camera.update_view();
        camera.update_projection();
        camera
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection_params = Projection {
            field_of_view: projection
                .field_of_view
                .clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW),
            ..projection
        };
        self.update_projection();
        self
    }

    pub fn with_convention(mut self, convention: CameraConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Displace by `offset` expressed in camera-local axes
    /// (x along right, y along up, z along forward)
    pub fn move_local(&mut self, offset: Vec3) {
        let forward_sign = CameraConvention::sign(self.convention.invert_forward);

        self.position += self.forward * offset.z * forward_sign
            + self.right * offset.x
            + self.up * offset.y;

        self.update_view();
    }

    /// Turn about the up axis
    pub fn yaw(&mut self, degrees: f32) {
        let angle = -degrees * CameraConvention::sign(self.convention.invert_yaw);
        let Some(rotation) = Self::rotation(self.up, angle) else {
            return;
        };

        self.forward = (rotation * self.forward).normalize();
        self.right = self.forward.cross(self.up).normalize();
        self.up = self.right.cross(self.forward).normalize();

        self.update_view();
    }

    /// Tilt about the right axis; not clamped, the camera can loop over
    pub fn pitch(&mut self, degrees: f32) {
        let angle = degrees * CameraConvention::sign(self.convention.invert_pitch);
        let Some(rotation) = Self::rotation(self.right, angle) else {
            return;
        };

        self.forward = (rotation * self.forward).normalize();
        self.up = self.right.cross(self.forward).normalize();
        self.right = self.forward.cross(self.up).normalize();

        self.update_view();
    }

    /// Bank about the forward axis
    pub fn roll(&mut self, degrees: f32) {
        let angle = degrees * CameraConvention::sign(self.convention.invert_roll);
        let Some(rotation) = Self::rotation(self.forward, angle) else {
            return;
        };

        self.up = (rotation * self.up).normalize();
        self.right = self.forward.cross(self.up).normalize();
        self.up = self.right.cross(self.forward).normalize();

        self.update_view();
    }

    /// Restore the canonical basis, keeping the position
    pub fn reset_rotation(&mut self) {
        self.forward = CANONICAL_FORWARD;
        self.up = CANONICAL_UP;
        self.right = CANONICAL_RIGHT;

        self.update_view();
    }

    /// Add `delta` degrees to the field of view, clamped to [1, 180]
    pub fn change_field_of_view(&mut self, delta: f32) {
        self.set_field_of_view(self.projection_params.field_of_view + delta);
    }

    pub fn set_field_of_view(&mut self, degrees: f32) {
        if degrees.is_nan() {
            return;
        }
        self.projection_params.field_of_view = degrees.clamp(MIN_FIELD_OF_VIEW, MAX_FIELD_OF_VIEW);
        self.update_projection();
    }

    /// Ignores ratios that are not finite and positive
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return;
        }
        self.projection_params.aspect_ratio = aspect_ratio;
        self.update_projection();
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn field_of_view(&self) -> f32 {
        self.projection_params.field_of_view
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.projection_params.aspect_ratio
    }

    pub fn convention(&self) -> CameraConvention {
        self.convention
    }

    fn rotation(axis: Vec3, degrees: f32) -> Option<Quat> {
        degrees
            .is_finite()
            .then(|| Quat::from_axis_angle(axis, degrees.to_radians()))
    }

    fn update_view(&mut self) {
        self.view = Mat4::look_at_rh(self.position, self.position + self.forward, self.up);
    }

    fn update_projection(&mut self) {
        let Projection {
            field_of_view,
            aspect_ratio,
            near,
            far,
        } = self.projection_params;
        self.projection = Mat4::perspective_rh(field_of_view.to_radians(), aspect_ratio, near, far);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, CANONICAL_FORWARD, CANONICAL_UP)
    }
}
