//! Player motion state: the Grounded/Airborne machine, its jump arc and the
//! tunables that drive it.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// Who may leave the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpGate {
    /// Only a player whose last downward probe found support.
    #[default]
    RequireStanding,
    /// Any grounded player, even mid-fall. Kept for comparison; lets the
    /// player chain jumps off thin air.
    Ungated,
}

/// Which duration a jump uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Short,
    /// Reserved for the swing mechanic; nothing triggers it from input.
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalState {
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Player's share of the per-frame speed.
    pub player_speed: f32,
    /// Fixed gain applied on top of `player_speed`.
    pub movement_gain: f32,
    /// Base speed per second; the per-frame speed is `input_speed * dt`.
    pub input_speed: f32,
    /// Camera orbit rate for the arrow keys (radians per second).
    pub turn_speed: f32,
    /// Constant fall step per tick while unsupported.
    pub gravity: f32,
    /// Camera share of each fall step, before the camera speed multiplier.
    pub camera_fall_ratio: f32,
    pub short_jump_duration: f32,
    pub long_jump_duration: f32,
    /// Half of the arc's rise: the apex sits at `2 * jump_height`.
    pub jump_height: f32,
    pub jump_gate: JumpGate,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.1,
            movement_gain: 20.0,
            input_speed: 30.0,
            turn_speed: 2.0,
            gravity: 0.02,
            camera_fall_ratio: 0.5,
            short_jump_duration: 1.0,
            long_jump_duration: 2.7,
            jump_height: 5.0,
            jump_gate: JumpGate::RequireStanding,
        }
    }
}

impl MotionConfig {
    pub fn duration_for(&self, kind: JumpKind) -> f32 {
        match kind {
            JumpKind::Short => self.short_jump_duration,
            JumpKind::Long => self.long_jump_duration,
        }
    }
}

/// Height of the eased jump arc at `t` seconds into a jump of `duration`.
///
/// One full cosine period: `initial` at both ends, `initial + 2 * peak` at
/// the midpoint.
pub fn jump_arc_height(initial: f32, peak: f32, t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return initial;
    }
    let phase = (t / duration).clamp(0.0, 1.0);
    initial + (1.0 - (TAU * phase).cos()) * peak
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub jumping: bool,
    pub standing: bool,
    pub jump_elapsed: f32,
    pub jump_start: f32,
    pub jump_duration: f32,
    pub jump_peak_height: f32,
    pub initial_height: f32,
    pub initial_camera_height: f32,
    /// Player facing in radians, accumulated from yaw input. Visual only.
    pub facing: f32,
}

impl MotionState {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            jumping: false,
            standing: false,
            jump_elapsed: 0.0,
            jump_start: 0.0,
            jump_duration: config.short_jump_duration,
            jump_peak_height: config.jump_height,
            initial_height: 0.0,
            initial_camera_height: 0.0,
            facing: 0.0,
        }
    }

    pub fn vertical_state(&self) -> VerticalState {
        if self.jumping {
            VerticalState::Airborne
        } else {
            VerticalState::Grounded
        }
    }

    pub fn can_jump(&self, gate: JumpGate) -> bool {
        !self.jumping
            && match gate {
                JumpGate::RequireStanding => self.standing,
                JumpGate::Ungated => true,
            }
    }

    /// Grounded → Airborne. Records where the player and camera left from.
    pub fn begin_jump(&mut self, now: f32, duration: f32, player_height: f32, camera_height: f32) {
        self.jumping = true;
        self.standing = false;
        self.jump_start = now;
        self.jump_elapsed = 0.0;
        self.jump_duration = duration;
        self.initial_height = player_height;
        self.initial_camera_height = camera_height;
    }

    /// Advance the arc to `now`. Returns the player and camera heights for
    /// this frame, plus whether the jump just ended.
    pub fn advance_jump(&mut self, now: f32) -> (f32, f32, bool) {
        self.jump_elapsed = (now - self.jump_start).max(0.0);
        let height = jump_arc_height(
            self.initial_height,
            self.jump_peak_height,
            self.jump_elapsed,
            self.jump_duration,
        );
        let camera_height = self.initial_camera_height + (height - self.initial_height);
        let landed = self.jump_elapsed >= self.jump_duration;
        (height, camera_height, landed)
    }

    /// Airborne → Grounded; the next jump uses the default duration again.
    pub fn end_jump(&mut self, config: &MotionConfig) {
        self.jumping = false;
        self.jump_duration = config.short_jump_duration;
    }
}
