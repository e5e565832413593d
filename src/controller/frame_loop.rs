use glam::Vec3;
use tracing::{debug, info, trace, warn};

use super::camera_controller::CameraController;
use super::input::{Action, InputEvent, InputProcessor, InputSource, InputState};
use super::player_controller::{FrameTime, PlayerController, TickReport};
use crate::config::GameConfig;
use crate::error::Result;
use crate::model::{Camera, SceneDescription, WorldRegistry};
use crate::view::RenderFrame;

/// Longest step a single frame may integrate, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Keys drive the player; the camera follows rigidly.
    Player,
    /// Keys fly the camera; the player is frozen.
    FreeFly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Quit,
}

/// Main game loop state and update logic
pub struct FrameLoopContext {
    pub world: WorldRegistry,
    pub camera: Camera,
    pub player: PlayerController,
    pub camera_controller: CameraController,
    pub input_processor: InputProcessor,
    mode: ControlMode,
    last_time: Option<f32>,
    frame: u64,
    last_report: TickReport,
}

impl FrameLoopContext {
    pub fn new(config: &GameConfig, scene: &SceneDescription) -> Result<Self> {
        let (world, camera) = scene.build(&config.camera)?;

        let overlapping = world.player_collisions()?;
        if !overlapping.is_empty() {
            warn!(?overlapping, "player spawned inside obstacles; moves into them will be rejected");
        }

        Ok(Self {
            world,
            camera,
            player: PlayerController::new(config.motion.clone()),
            camera_controller: CameraController::new(config.camera.fly_speed, config.motion.turn_speed),
            input_processor: InputProcessor::new(config.bindings.clone()),
            mode: ControlMode::Player,
            last_time: None,
            frame: 0,
            last_report: TickReport::default(),
        })
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// What the player controller did on the most recent player-mode frame.
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn player_position(&self) -> Result<Vec3> {
        Ok(self.world.player()?.position())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    /// Apply a raw key event to `input` and run edge-triggered toggles.
    /// A toggle fires only when its key goes from released to pressed, so
    /// auto-repeat `KeyDown`s are ignored. Returns the action the key maps
    /// to, if any.
    pub fn handle_event(&mut self, input: &mut InputState, event: &InputEvent) -> Option<Action> {
        let action = match event {
            InputEvent::KeyDown(key) => self.input_processor.action_for_key(key),
            _ => None,
        };
        let was_held = action.is_some_and(|a| self.input_processor.is_active(input, a));
        input.process_event(event);

        if action == Some(Action::ToggleFly) && !was_held {
            self.toggle_fly();
        }
        action
    }

    pub fn toggle_fly(&mut self) {
        self.mode = match self.mode {
            ControlMode::Player => {
                self.camera_controller.enter(&self.camera);
                ControlMode::FreeFly
            }
            ControlMode::FreeFly => {
                self.camera_controller.exit(&mut self.camera);
                ControlMode::Player
            }
        };
        info!(mode = ?self.mode, "control mode changed");
    }

    /// Advance one frame. Time is sampled once here; `dt` is clamped so a
    /// stall doesn't turn into one huge step.
    pub fn update(&mut self, input: &InputState, now: f32) -> Result<FrameStatus> {
        let dt = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.frame += 1;

        let bound = self.input_processor.bind(input);
        if bound.is_pressed(Action::Quit) {
            info!(frame = self.frame, "quit requested");
            return Ok(FrameStatus::Quit);
        }

        match self.mode {
            ControlMode::Player => {
                let report = self
                    .player
                    .tick(&mut self.world, &mut self.camera, &bound, FrameTime { now, dt })?;
                if report.jumped {
                    debug!(frame = self.frame, "jump");
                }
                if report.landed {
                    debug!(frame = self.frame, "landed");
                }
                self.last_report = report;
            }
            ControlMode::FreeFly => {
                self.camera_controller.update(&mut self.camera, &bound, dt);
            }
        }

        trace!(
            frame = self.frame,
            dt,
            eye = ?self.camera.position(),
            vertical = ?self.player.state().vertical_state(),
            flying = self.camera_controller.is_flying(),
            "frame updated"
        );
        Ok(FrameStatus::Continue)
    }

    /// Renderer input for the current state.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::build(self.frame, &self.world, &self.camera, self.player.state().facing)
    }
}
