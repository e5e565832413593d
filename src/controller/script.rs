//! Timed key presses for driving the simulation without a keyboard.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::input::InputEvent;
use crate::error::{GameError, Result};

/// Keys held from `start` until `end` (seconds of simulated time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub start: f32,
    pub end: f32,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let script: Self = crate::error::read_ron(path)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if !step.start.is_finite() || !step.end.is_finite() || step.end < step.start {
                return Err(GameError::InvalidScript(format!(
                    "step {i} has an invalid time range {}..{}",
                    step.start, step.end
                )));
            }
        }
        Ok(())
    }

    /// Walk, hop, look around, fly a little and quit.
    pub fn demo() -> Self {
        let step = |start: f32, end: f32, keys: &[&str]| ScriptStep {
            start,
            end,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        };
        Self {
            steps: vec![
                step(1.0, 1.3, &["w"]),
                step(1.5, 1.6, &[" "]),
                step(2.5, 3.3, &["ArrowLeft"]),
                step(3.4, 3.6, &["d"]),
                step(4.0, 4.3, &["ArrowUp"]),
                step(4.5, 4.8, &["s"]),
                step(5.0, 5.1, &[" "]),
                step(6.0, 6.1, &["f"]),
                step(6.2, 7.0, &["w", " "]),
                step(7.5, 7.6, &["f"]),
                step(8.5, 8.6, &["Escape"]),
            ],
        }
    }

    /// Latest `end` of any step.
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|s| s.end).fold(0.0, f32::max)
    }

    /// Key events timed in `(after, upto]`, in time order; at equal times
    /// releases come before presses.
    pub fn events_between(&self, after: f32, upto: f32) -> Vec<InputEvent> {
        let in_window = |t: f32| t > after && t <= upto;
        let mut timed: Vec<(f32, u8, InputEvent)> = Vec::new();
        for step in &self.steps {
            if in_window(step.start) {
                timed.extend(step.keys.iter().map(|k| (step.start, 1, InputEvent::KeyDown(k.clone()))));
            }
            if in_window(step.end) {
                timed.extend(step.keys.iter().map(|k| (step.end, 0, InputEvent::KeyUp(k.clone()))));
            }
        }
        timed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        timed.into_iter().map(|(_, _, event)| event).collect()
    }
}
