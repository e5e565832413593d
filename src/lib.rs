//! A small third-person box world: a free camera orbiting the player, AABB
//! look-ahead collision gating every move, and an eased jump arc.

pub mod config;
pub mod error;
pub mod logging;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

pub use config::GameConfig;
pub use controller::{FrameLoopContext, FrameStatus};
pub use error::{GameError, Result};
