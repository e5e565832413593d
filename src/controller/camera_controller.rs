use tracing::debug;

use super::input::{Action, InputSource};
use crate::model::Camera;

/// Spectator camera: detaches from the player, flies with the movement keys
/// and looks around its own position.
pub struct CameraController {
    pub fly_speed: f32,
    pub turn_speed: f32,
    /// Camera as it was when free-fly started; restored on exit.
    saved: Option<Camera>,
}

impl CameraController {
    pub fn new(fly_speed: f32, turn_speed: f32) -> Self {
        Self {
            fly_speed,
            turn_speed,
            saved: None,
        }
    }

    pub fn is_flying(&self) -> bool {
        self.saved.is_some()
    }

    pub fn enter(&mut self, camera: &Camera) {
        debug!(position = ?camera.position(), "free-fly on");
        self.saved = Some(camera.clone());
    }

    /// Put the camera back where the player left it.
    pub fn exit(&mut self, camera: &mut Camera) {
        if let Some(saved) = self.saved.take() {
            *camera = saved;
            debug!("free-fly off");
        }
    }

    /// Update camera position and orientation from held keys
    pub fn update(&self, camera: &mut Camera, input: &impl InputSource, dt: f32) {
        let speed = self.fly_speed * dt;

        if input.is_pressed(Action::Forward) {
            camera.move_along_view(1.0, speed);
        }
        if input.is_pressed(Action::Back) {
            camera.move_along_view(-1.0, speed);
        }
        if input.is_pressed(Action::StrafeLeft) {
            camera.move_along_right(-1.0, speed);
        }
        if input.is_pressed(Action::StrafeRight) {
            camera.move_along_right(1.0, speed);
        }
        if input.is_pressed(Action::Jump) {
            camera.move_vertical(speed);
        }

        let angle = self.turn_speed * dt;
        let pivot = camera.position();
        if input.is_pressed(Action::YawLeft) {
            camera.rotate_oy(angle, pivot);
        }
        if input.is_pressed(Action::YawRight) {
            camera.rotate_oy(-angle, pivot);
        }
        if input.is_pressed(Action::PitchUp) {
            camera.rotate_ox(angle, pivot);
        }
        if input.is_pressed(Action::PitchDown) {
            camera.rotate_ox(-angle, pivot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::collections::HashSet;

    const EPS: f32 = 1e-4;

    fn held(actions: &[Action]) -> HashSet<Action> {
        actions.iter().copied().collect()
    }

    #[test]
    fn test_fly_forward_and_up() {
        let ctl = CameraController::new(10.0, 2.0);
        let mut cam = Camera::new(Vec3::ZERO);
        ctl.update(&mut cam, &held(&[Action::Forward, Action::Jump]), 0.1);
        // speed 1 per step, doubled by the camera's multiplier
        assert!((cam.position() - Vec3::new(0.0, 2.0, -2.0)).length() < EPS);
    }

    #[test]
    fn test_look_rotates_in_place() {
        let ctl = CameraController::new(10.0, 2.0);
        let mut cam = Camera::new(Vec3::new(3.0, 4.0, 5.0));
        ctl.update(&mut cam, &held(&[Action::YawLeft, Action::PitchDown]), 0.25);
        assert!((cam.position() - Vec3::new(3.0, 4.0, 5.0)).length() < EPS);
        assert!(cam.view_direction().y < 0.0);
    }

    #[test]
    fn test_exit_restores_snapshot() {
        let mut ctl = CameraController::new(10.0, 2.0);
        let mut cam = Camera::new(Vec3::new(1.0, 1.0, 1.0));
        let before = cam.clone();
        ctl.enter(&cam);
        assert!(ctl.is_flying());
        ctl.update(&mut cam, &held(&[Action::StrafeRight, Action::YawRight]), 0.5);
        assert_ne!(cam, before);
        ctl.exit(&mut cam);
        assert!(!ctl.is_flying());
        assert_eq!(cam, before);
    }

    #[test]
    fn test_exit_without_enter_is_a_no_op() {
        let mut ctl = CameraController::new(10.0, 2.0);
        let mut cam = Camera::default();
        let before = cam.clone();
        ctl.exit(&mut cam);
        assert_eq!(cam, before);
    }
}
