use glam::{Mat3, Mat4, Vec3};

/// Free camera described by an explicit basis instead of yaw/pitch angles.
///
/// `right` is never stored across a rotation on its own: every rotation
/// re-derives it from `view × up`, which keeps the basis from drifting.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    view_direction: Vec3,
    up: Vec3,
    right: Vec3,
    speed_multiplier: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub const DEFAULT_SPEED_MULTIPLIER: f32 = 2.0;

    /// Camera at `position` looking down -Z with +Y up.
    pub fn new(position: Vec3) -> Self {
        Self::look_from(position, Vec3::NEG_Z, Vec3::Y, Self::DEFAULT_SPEED_MULTIPLIER)
    }

    /// Build from a view direction and an approximate up vector; the basis is
    /// orthonormalised so `up ⟂ view` even if the caller's up was skewed.
    pub fn look_from(position: Vec3, view_direction: Vec3, up: Vec3, speed_multiplier: f32) -> Self {
        let view_direction = view_direction.normalize();
        let right = view_direction.cross(up).normalize();
        let up = right.cross(view_direction).normalize();
        Self {
            position,
            view_direction,
            up,
            right: view_direction.cross(up),
            speed_multiplier,
            fov_y: 60f32.to_radians(),
            aspect: 1.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    pub fn with_projection(mut self, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        self.fov_y = fov_y;
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_direction(&self) -> Vec3 {
        self.view_direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.view_direction
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * self.view_matrix()
    }

    /// View direction flattened onto the ground plane (y zeroed, not
    /// renormalised), so forward motion stays horizontal when pitched.
    pub fn horizontal_view(&self) -> Vec3 {
        self.view_direction * Vec3::new(1.0, 0.0, 1.0)
    }

    /// Strafe axis: the full, unprojected `view × up`.
    pub fn strafe_axis(&self) -> Vec3 {
        self.view_direction.cross(self.up)
    }

    pub fn move_along_view(&mut self, sign: f32, speed: f32) {
        self.position += sign * self.horizontal_view() * speed * self.speed_multiplier;
    }

    pub fn move_along_right(&mut self, sign: f32, speed: f32) {
        self.position += sign * self.strafe_axis() * speed * self.speed_multiplier;
    }

    /// Positive `delta` rises, negative falls.
    pub fn move_vertical(&mut self, delta: f32) {
        self.position += Vec3::Y * delta * self.speed_multiplier;
    }

    /// Unscaled translation, used to keep the camera rigidly attached to the
    /// player's committed displacement.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    fn orbit(&mut self, rotation: Mat3, pivot: Vec3) {
        let relative = self.position - pivot;
        self.position = rotation * relative + pivot;
    }

    /// Pitch about the camera's own right axis, orbiting `pivot`.
    pub fn rotate_ox(&mut self, angle: f32, pivot: Vec3) {
        let rotation = Mat3::from_axis_angle(self.right.normalize(), angle);
        self.orbit(rotation, pivot);

        self.view_direction = (rotation * self.view_direction).normalize();
        // up from the old right and the new view, then right from the new up
        self.up = self.right.cross(self.view_direction).normalize();
        self.right = self.view_direction.cross(self.up);
    }

    /// Yaw about world +Y, orbiting `pivot`. The axis is already vertical, so
    /// view and up are rotated directly.
    pub fn rotate_oy(&mut self, angle: f32, pivot: Vec3) {
        let rotation = Mat3::from_rotation_y(angle);
        self.orbit(rotation, pivot);

        self.view_direction = (rotation * self.view_direction).normalize();
        self.up = (rotation * self.up).normalize();
        self.right = self.view_direction.cross(self.up).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(20.0, 10.0, 20.0))
    }
}
