//! Tunables loaded from a RON file. Every section and field is optional;
//! anything missing keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::input::KeyBindings;
use crate::controller::motion::MotionConfig;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub motion: MotionConfig,
    pub camera: CameraConfig,
    pub bindings: KeyBindings,
}

impl GameConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::error::read_ron(path)
    }

    pub fn from_ron_str(s: &str) -> std::result::Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Scales every keyboard-driven camera translation.
    pub speed_multiplier: f32,
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Free-fly translation speed (units per second, before the multiplier).
    pub fly_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 2.0,
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 1000.0,
            fly_speed: 10.0,
        }
    }
}
