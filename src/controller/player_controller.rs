//! Per-frame player motion: keyboard translation gated by look-ahead
//! collision, the jump trigger, camera orbit, and vertical integration.

use glam::Vec3;
use tracing::debug;

use super::input::{Action, InputSource};
use super::motion::{JumpGate, JumpKind, MotionConfig, MotionState};
use crate::error::Result;
use crate::model::{Camera, EntityId, WorldRegistry};

/// One time sample per frame; every delta in the frame derives from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the simulation started (monotonic).
    pub now: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Committed(Vec3),
    Blocked(EntityId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub moves: Vec<(Action, MoveOutcome)>,
    pub jumped: bool,
    pub landed: bool,
    pub fell: bool,
    pub standing: bool,
}

const MOVE_ACTIONS: [Action; 4] = [Action::Forward, Action::Back, Action::StrafeLeft, Action::StrafeRight];

/// Number of look-ahead samples for `displacement`: each stays within the
/// player's smallest extent so a long step can't skip over a thin obstacle.
fn sample_count(size: Vec3, displacement: Vec3) -> u32 {
    let reach = size.min_element();
    let distance = displacement.length();
    if !reach.is_finite() || reach <= 0.0 || !distance.is_finite() {
        return 1;
    }
    (distance / reach).ceil().max(1.0) as u32
}

pub struct PlayerController {
    config: MotionConfig,
    state: MotionState,
}

impl PlayerController {
    pub fn new(config: MotionConfig) -> Self {
        let state = MotionState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn set_jump_gate(&mut self, gate: JumpGate) {
        self.config.jump_gate = gate;
    }

    /// Run one frame: input-driven motion first, then vertical integration.
    pub fn tick(
        &mut self,
        world: &mut WorldRegistry,
        camera: &mut Camera,
        input: &impl InputSource,
        time: FrameTime,
    ) -> Result<TickReport> {
        let mut report = TickReport::default();

        // horizontal translation, all-or-nothing per direction
        for action in MOVE_ACTIONS {
            if !input.is_pressed(action) {
                continue;
            }
            let displacement = self.displacement_for(camera, action, time.dt);
            let outcome = self.try_move(world, camera, displacement)?;
            if let MoveOutcome::Blocked(id) = outcome {
                debug!(?action, blocker = id, "move blocked");
            }
            report.moves.push((action, outcome));
        }

        if input.is_pressed(Action::Jump) {
            report.jumped = self.try_jump(world, camera, time.now, JumpKind::Short)?;
        }

        self.apply_rotation(world, camera, input, time.dt)?;

        let (landed, fell) = self.integrate_vertical(world, camera, time.now)?;
        report.landed = landed;
        report.fell = fell;
        report.standing = self.state.standing;
        Ok(report)
    }

    /// World-space displacement a held movement key asks for this frame.
    pub fn displacement_for(&self, camera: &Camera, action: Action, dt: f32) -> Vec3 {
        let direction = match action {
            Action::Forward => camera.horizontal_view(),
            Action::Back => -camera.horizontal_view(),
            Action::StrafeLeft => -camera.strafe_axis(),
            Action::StrafeRight => camera.strafe_axis(),
            _ => Vec3::ZERO,
        };
        let speed = self.config.input_speed * dt;
        direction * speed * self.config.player_speed * self.config.movement_gain
    }

    /// Look-ahead commit: probe the player's box along `displacement`; if
    /// any obstacle would overlap at any probe, nothing changes. Otherwise
    /// the player and the camera both move by exactly `displacement`.
    pub fn try_move(
        &self,
        world: &mut WorldRegistry,
        camera: &mut Camera,
        displacement: Vec3,
    ) -> Result<MoveOutcome> {
        let player = world.player()?;
        let (position, size) = (player.position(), player.size());

        let samples = sample_count(size, displacement);
        for i in 1..=samples {
            let candidate = position + displacement * (i as f32 / samples as f32);
            if let Some(blocker) = world.first_blocker(candidate, size) {
                return Ok(MoveOutcome::Blocked(blocker.id()));
            }
        }

        let player_id = world.player_id();
        world.set_position(player_id, position + displacement)?;
        camera.translate(displacement);
        Ok(MoveOutcome::Committed(displacement))
    }

    /// Enter the airborne state if the gate allows it.
    pub fn try_jump(
        &mut self,
        world: &WorldRegistry,
        camera: &Camera,
        now: f32,
        kind: JumpKind,
    ) -> Result<bool> {
        if !self.state.can_jump(self.config.jump_gate) {
            return Ok(false);
        }
        let height = world.player()?.position().y;
        let duration = self.config.duration_for(kind);
        self.state.begin_jump(now, duration, height, camera.position().y);
        debug!(height, duration, "jump started");
        Ok(true)
    }

    fn apply_rotation(
        &mut self,
        world: &WorldRegistry,
        camera: &mut Camera,
        input: &impl InputSource,
        dt: f32,
    ) -> Result<()> {
        let angle = self.config.turn_speed * dt;
        let pivot = world.player()?.position();
        let eye_height = camera.position().y;

        if input.is_pressed(Action::YawLeft) {
            camera.rotate_oy(angle, pivot);
            self.state.facing += angle;
        }
        if input.is_pressed(Action::YawRight) {
            camera.rotate_oy(-angle, pivot);
            self.state.facing -= angle;
        }
        if input.is_pressed(Action::PitchUp) {
            camera.rotate_ox(angle, pivot);
        }
        if input.is_pressed(Action::PitchDown) {
            camera.rotate_ox(-angle, pivot);
        }

        // pitching mid-jump moves the eye vertically; keep the arc anchored to it
        if self.state.jumping {
            self.state.initial_camera_height += camera.position().y - eye_height;
        }
        Ok(())
    }

    /// Jump arc while airborne, constant-speed fall probe while grounded.
    /// Returns `(landed, fell)` for this frame.
    pub fn integrate_vertical(
        &mut self,
        world: &mut WorldRegistry,
        camera: &mut Camera,
        now: f32,
    ) -> Result<(bool, bool)> {
        let player_id = world.player_id();
        let mut landed = false;

        if self.state.jumping {
            let (height, camera_height, done) = self.state.advance_jump(now);
            let player = world.player()?;
            let position = player.position();
            world.set_position(player_id, Vec3::new(position.x, height, position.z))?;
            let eye = camera.position();
            camera.set_position(Vec3::new(eye.x, camera_height, eye.z));

            if done {
                self.state.end_jump(&self.config);
                landed = true;
                debug!(height, "jump finished");
            }
        }

        if self.state.jumping {
            return Ok((landed, false));
        }

        let player = world.player()?;
        let (position, size) = (player.position(), player.size());
        let step = Vec3::new(0.0, self.config.gravity, 0.0);
        let supported = world.first_blocker(position - step, size).is_some();

        self.state.standing = supported;
        if supported {
            return Ok((landed, false));
        }

        world.set_position(player_id, position - step)?;
        camera.move_vertical(-self.config.gravity * self.config.camera_fall_ratio);
        Ok((landed, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;
    use std::collections::HashSet;

    const EPS: f32 = 1e-4;

    fn held(actions: &[Action]) -> HashSet<Action> {
        actions.iter().copied().collect()
    }

    /// Player at the origin, a wall at x = 5 and a floor directly below.
    fn setup() -> (WorldRegistry, Camera, PlayerController) {
        let mut world = WorldRegistry::new(Entity::new_box(0, Vec3::ZERO, Vec3::splat(2.0), "orange"));
        world.insert(Entity::new_box(1, Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0), "rock")).unwrap();
        world.insert(Entity::new_box(2, Vec3::new(-20.0, -1.0, -20.0), Vec3::new(40.0, 1.0, 40.0), "wood")).unwrap();
        let camera = Camera::look_from(Vec3::new(1.0, 6.0, 10.0), Vec3::NEG_Z, Vec3::Y, 2.0);
        (world, camera, PlayerController::new(MotionConfig::default()))
    }

    fn player_pos(world: &WorldRegistry) -> Vec3 {
        world.player().unwrap().position()
    }

    #[test]
    fn test_move_into_wall_is_rejected() {
        let (mut world, mut camera, ctl) = setup();
        let cam_before = camera.clone();
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(4.0, 0.0, 0.0)).unwrap();
        assert_eq!(out, MoveOutcome::Blocked(1));
        assert_eq!(player_pos(&world), Vec3::ZERO);
        assert_eq!(camera, cam_before);
    }

    #[test]
    fn test_move_away_from_wall_commits() {
        let (mut world, mut camera, ctl) = setup();
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(-4.0, 0.0, 0.0)).unwrap();
        assert_eq!(out, MoveOutcome::Committed(Vec3::new(-4.0, 0.0, 0.0)));
        assert_eq!(player_pos(&world), Vec3::new(-4.0, 0.0, 0.0));
    }

    #[test]
    fn test_speed_two_keypress_scales_through_gains() {
        // speed 2 * player_speed 0.1 * gain 20 = 4 units: enough to reach the wall
        let (mut world, mut camera, ctl) = setup();
        let facing_x = Camera::look_from(camera.position(), Vec3::X, Vec3::Y, 2.0);
        let d = ctl.displacement_for(&facing_x, Action::Forward, 2.0 / 30.0);
        assert!((d - Vec3::new(4.0, 0.0, 0.0)).length() < EPS);
        assert_eq!(ctl.try_move(&mut world, &mut camera, d).unwrap(), MoveOutcome::Blocked(1));

        let back = ctl.displacement_for(&facing_x, Action::Back, 2.0 / 30.0);
        assert!(matches!(ctl.try_move(&mut world, &mut camera, back).unwrap(), MoveOutcome::Committed(_)));
    }

    #[test]
    fn test_touching_wall_is_not_blocking() {
        let (mut world, mut camera, ctl) = setup();
        // ends flush against the wall's face at x = 5
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert!(matches!(out, MoveOutcome::Committed(_)));
    }

    #[test]
    fn test_camera_moves_rigidly_with_player() {
        let (mut world, mut camera, ctl) = setup();
        let d = Vec3::new(-1.25, 0.0, 0.75);
        let before = camera.position();
        ctl.try_move(&mut world, &mut camera, d).unwrap();
        assert!((camera.position() - before - d).length() < EPS);
        assert_eq!(player_pos(&world), d);
    }

    #[test]
    fn test_blocked_tick_is_idempotent() {
        let (mut world, mut camera, mut ctl) = setup();
        // face +X so Forward runs into the wall
        camera = Camera::look_from(camera.position(), Vec3::X, Vec3::Y, 2.0);
        let input = held(&[Action::Forward]);
        let time = FrameTime { now: 0.0, dt: 2.0 / 30.0 };
        // settle: the floor supports the player at y = 0
        ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        let (pos, cam, state) = (player_pos(&world), camera.clone(), ctl.state().clone());

        let report = ctl.tick(&mut world, &mut camera, &input, time).unwrap();
        assert_eq!(report.moves, vec![(Action::Forward, MoveOutcome::Blocked(1))]);
        assert_eq!(player_pos(&world), pos);
        assert_eq!(camera, cam);
        assert_eq!(ctl.state(), &state);
    }

    #[test]
    fn test_fall_until_supported() {
        let (mut world, mut camera, mut ctl) = setup();
        world.set_position(0, Vec3::new(0.0, 0.05, 0.0)).unwrap();
        let cam_y = camera.position().y;

        let (_, fell) = ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        assert!(fell);
        assert!(!ctl.state().standing);
        assert!((player_pos(&world).y - 0.03).abs() < EPS);
        // half-rate camera step, doubled back up by the speed multiplier
        assert!((camera.position().y - (cam_y - 0.02)).abs() < EPS);

        ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        let (_, fell) = ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        assert!(!fell);
        assert!(ctl.state().standing);
        assert!(player_pos(&world).y >= 0.0);
        assert!(player_pos(&world).y < 0.02);
    }

    #[test]
    fn test_jump_requires_standing() {
        let (mut world, camera, mut ctl) = setup();
        world.set_position(0, Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert!(!ctl.try_jump(&world, &camera, 0.0, JumpKind::Short).unwrap());

        ctl.set_jump_gate(JumpGate::Ungated);
        assert!(ctl.try_jump(&world, &camera, 0.0, JumpKind::Short).unwrap());
        assert!(ctl.state().jumping);
    }

    #[test]
    fn test_jump_arc_through_ticks() {
        let (mut world, mut camera, mut ctl) = setup();
        let idle = held(&[]);
        let jump = held(&[Action::Jump]);

        let r = ctl.tick(&mut world, &mut camera, &idle, FrameTime { now: 0.0, dt: 0.0 }).unwrap();
        assert!(r.standing);
        let cam_y = camera.position().y;

        let r = ctl.tick(&mut world, &mut camera, &jump, FrameTime { now: 1.0, dt: 0.0 }).unwrap();
        assert!(r.jumped);
        assert!(player_pos(&world).y.abs() < EPS);

        ctl.tick(&mut world, &mut camera, &idle, FrameTime { now: 1.5, dt: 0.5 }).unwrap();
        assert!((player_pos(&world).y - 10.0).abs() < EPS);
        assert!((camera.position().y - (cam_y + 10.0)).abs() < EPS);

        // held jump while airborne does nothing
        let r = ctl.tick(&mut world, &mut camera, &jump, FrameTime { now: 1.75, dt: 0.25 }).unwrap();
        assert!(!r.jumped);

        let r = ctl.tick(&mut world, &mut camera, &idle, FrameTime { now: 2.0, dt: 0.25 }).unwrap();
        assert!(r.landed);
        assert!(!ctl.state().jumping);
        assert!(player_pos(&world).y.abs() < EPS);
        assert!((camera.position().y - cam_y).abs() < EPS);
        assert!(r.standing);
    }

    #[test]
    fn test_horizontal_blocked_while_airborne() {
        let (mut world, mut camera, mut ctl) = setup();
        camera = Camera::look_from(camera.position(), Vec3::X, Vec3::Y, 2.0);
        world.set_position(0, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        ctl.try_jump(&world, &camera, 0.0, JumpKind::Short).unwrap();

        let push = held(&[Action::Forward]);
        let r = ctl.tick(&mut world, &mut camera, &push, FrameTime { now: 0.1, dt: 0.05 }).unwrap();
        assert_eq!(r.moves[0].1, MoveOutcome::Blocked(1));
        assert!(player_pos(&world).y > 0.0);
        assert_eq!(player_pos(&world).x, 3.0);
    }

    #[test]
    fn test_yaw_accumulates_facing_and_orbits_player() {
        let (mut world, mut camera, mut ctl) = setup();
        let pivot = player_pos(&world);
        let radius = (camera.position() - pivot).length();
        let input = held(&[Action::YawLeft]);
        ctl.tick(&mut world, &mut camera, &input, FrameTime { now: 0.0, dt: 0.25 }).unwrap();
        assert!((ctl.state().facing - 0.5).abs() < EPS);
        assert!(((camera.position() - pivot).length() - radius).abs() < EPS);

        let input = held(&[Action::YawRight, Action::PitchUp]);
        ctl.tick(&mut world, &mut camera, &input, FrameTime { now: 0.25, dt: 0.25 }).unwrap();
        assert!(ctl.state().facing.abs() < EPS);
        assert!(camera.view_direction().dot(camera.up()).abs() < EPS);
    }

    #[test]
    fn test_pitch_during_jump_keeps_camera_offset() {
        let (mut world, mut camera, mut ctl) = setup();
        ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        ctl.try_jump(&world, &camera, 0.0, JumpKind::Short).unwrap();
        let radius = (camera.position() - player_pos(&world)).length();

        let pitch = held(&[Action::PitchUp]);
        for i in 1..=4 {
            let now = i as f32 * 0.1;
            ctl.tick(&mut world, &mut camera, &pitch, FrameTime { now, dt: 0.1 }).unwrap();
            assert!(((camera.position() - player_pos(&world)).length() - radius).abs() < EPS);
        }
    }

    #[test]
    fn test_long_step_cannot_skip_thin_wall() {
        let mut world = WorldRegistry::new(Entity::new_box(0, Vec3::ZERO, Vec3::splat(2.0), "orange"));
        world.insert(Entity::new_box(1, Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 2.0), "rock")).unwrap();
        let mut camera = Camera::default();
        let cam_before = camera.clone();
        let ctl = PlayerController::new(MotionConfig::default());

        // the end position (6..8) clears the wall (3..4); the path doesn't
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(6.0, 0.0, 0.0)).unwrap();
        assert_eq!(out, MoveOutcome::Blocked(1));
        assert_eq!(player_pos(&world), Vec3::ZERO);
        assert_eq!(camera, cam_before);
    }

    #[test]
    fn test_jump_can_land_inside_a_ledge() {
        let mut world = WorldRegistry::new(Entity::new_box(0, Vec3::ZERO, Vec3::splat(2.0), "orange"));
        world.insert(Entity::new_box(1, Vec3::new(-20.0, -1.0, -20.0), Vec3::new(40.0, 1.0, 40.0), "wood")).unwrap();
        world.insert(Entity::new_box(2, Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 3.0, 2.0), "rock")).unwrap();
        let mut camera = Camera::default();
        let mut ctl = PlayerController::new(MotionConfig::default());

        ctl.integrate_vertical(&mut world, &mut camera, 0.0).unwrap();
        assert!(ctl.try_jump(&world, &camera, 0.0, JumpKind::Short).unwrap());
        ctl.integrate_vertical(&mut world, &mut camera, 0.5).unwrap();
        // over the ledge at the apex
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert!(matches!(out, MoveOutcome::Committed(_)));

        let (landed, _) = ctl.integrate_vertical(&mut world, &mut camera, 1.0).unwrap();
        assert!(landed);
        assert_eq!(world.player_collisions().unwrap(), vec![2]);
    }

    #[test]
    fn test_sample_count_follows_smallest_extent() {
        assert_eq!(sample_count(Vec3::splat(2.0), Vec3::new(6.0, 0.0, 0.0)), 3);
        assert_eq!(sample_count(Vec3::splat(2.0), Vec3::new(0.5, 0.0, 0.0)), 1);
        assert_eq!(sample_count(Vec3::splat(2.0), Vec3::ZERO), 1);
        assert_eq!(sample_count(Vec3::new(0.0, 2.0, 2.0), Vec3::new(9.0, 0.0, 0.0)), 1);
    }

    #[test]
    fn test_degenerate_player_is_never_blocked() {
        let mut world = WorldRegistry::new(Entity::new_box(0, Vec3::ZERO, Vec3::new(0.0, 2.0, 2.0), "orange"));
        world.insert(Entity::new_box(1, Vec3::new(-1.0, -1.0, -1.0), Vec3::splat(4.0), "rock")).unwrap();
        let mut camera = Camera::default();
        let ctl = PlayerController::new(MotionConfig::default());
        let out = ctl.try_move(&mut world, &mut camera, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(out, MoveOutcome::Committed(Vec3::new(1.0, 0.0, 0.0)));
    }
}
