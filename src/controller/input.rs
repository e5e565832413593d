/// Platform-agnostic input handling: raw key names in, logical actions out.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    FocusLost,
}

/// Logical keys the simulation polls every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Jump,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    Quit,
    ToggleFly,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Forward,
        Action::Back,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Jump,
        Action::YawLeft,
        Action::YawRight,
        Action::PitchUp,
        Action::PitchDown,
        Action::Quit,
        Action::ToggleFly,
    ];
}

/// Level-triggered "is this action held right now?" query.
pub trait InputSource {
    fn is_pressed(&self, action: Action) -> bool;
}

impl InputSource for HashSet<Action> {
    fn is_pressed(&self, action: Action) -> bool {
        self.contains(&action)
    }
}

/// Keys currently held, by name.
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::FocusLost => self.clear_keys(),
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: String,
    pub back: String,
    pub strafe_left: String,
    pub strafe_right: String,
    pub jump: String,
    pub yaw_left: String,
    pub yaw_right: String,
    pub pitch_up: String,
    pub pitch_down: String,
    pub quit: String,
    pub toggle_fly: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            back: "s".to_string(),
            strafe_left: "a".to_string(),
            strafe_right: "d".to_string(),
            jump: " ".to_string(),
            yaw_left: "ArrowLeft".to_string(),
            yaw_right: "ArrowRight".to_string(),
            pitch_up: "ArrowUp".to_string(),
            pitch_down: "ArrowDown".to_string(),
            quit: "Escape".to_string(),
            toggle_fly: "f".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, action: Action) -> &str {
        match action {
            Action::Forward => &self.forward,
            Action::Back => &self.back,
            Action::StrafeLeft => &self.strafe_left,
            Action::StrafeRight => &self.strafe_right,
            Action::Jump => &self.jump,
            Action::YawLeft => &self.yaw_left,
            Action::YawRight => &self.yaw_right,
            Action::PitchUp => &self.pitch_up,
            Action::PitchDown => &self.pitch_down,
            Action::Quit => &self.quit,
            Action::ToggleFly => &self.toggle_fly,
        }
    }
}

/// High-level input processor
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Letter keys match either case so caps lock doesn't freeze the player.
    pub fn is_active(&self, input: &InputState, action: Action) -> bool {
        let key = self.bindings.key_for(action);
        input.is_key_pressed(key)
            || (key.len() == 1
                && (input.is_key_pressed(&key.to_ascii_uppercase())
                    || input.is_key_pressed(&key.to_ascii_lowercase())))
    }

    /// Edge-triggered mapping for a single key-down.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&a| key.eq_ignore_ascii_case(self.bindings.key_for(a)))
    }

    pub fn bind<'a>(&'a self, state: &'a InputState) -> BoundInput<'a> {
        BoundInput { state, processor: self }
    }
}

/// An [`InputState`] seen through a set of bindings.
pub struct BoundInput<'a> {
    state: &'a InputState,
    processor: &'a InputProcessor,
}

impl InputSource for BoundInput<'_> {
    fn is_pressed(&self, action: Action) -> bool {
        self.processor.is_active(self.state, action)
    }
}
