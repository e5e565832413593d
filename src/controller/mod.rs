// CONTROLLER: input, player motion and the frame loop
pub mod camera_controller;
pub mod frame_loop;
pub mod input;
pub mod motion;
pub mod player_controller;
pub mod script;

pub use camera_controller::CameraController;
pub use frame_loop::{ControlMode, FrameLoopContext, FrameStatus};
pub use input::{Action, InputEvent, InputProcessor, InputSource, InputState, KeyBindings};
pub use motion::{JumpGate, JumpKind, MotionConfig, MotionState, VerticalState};
pub use player_controller::{FrameTime, MoveOutcome, PlayerController, TickReport};
pub use script::{InputScript, ScriptStep};
