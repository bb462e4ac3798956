//! Decoded per-tick intents and the sources that produce them

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub pave: bool,
    pub escape: bool,
}

impl InputIntent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn escape() -> Self {
        Self {
            escape: true,
            ..Self::default()
        }
    }

    pub fn with_pave(mut self) -> Self {
        self.pave = true;
        self
    }

    /// Unit direction on each axis; up is negative y.
    pub fn direction(&self) -> (f64, f64) {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        (axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// The input collaborator: one decoded intent per frame.
pub trait InputSource {
    fn next_intent(&mut self, frame: u64) -> InputIntent;
}

impl<F> InputSource for F
where
    F: FnMut(u64) -> InputIntent,
{
    fn next_intent(&mut self, frame: u64) -> InputIntent {
        self(frame)
    }
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(flatten)]
    pub intent: InputIntent,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// Replays a fixed list of steps, then asks to quit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    cursor: usize,
    used: u32,
}

impl ScriptedInput {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps,
            cursor: 0,
            used: 0,
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let steps: Vec<ScriptStep> =
            serde_yaml::from_str(text).context("Failed to parse input script")?;
        Ok(Self::new(steps))
    }

    pub fn is_exhausted(&self) -> bool {
        let mut remaining = self.steps.iter().skip(self.cursor);
        match remaining.next() {
            None => true,
            Some(current) => {
                self.used >= current.repeat && remaining.all(|step| step.repeat == 0)
            }
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_intent(&mut self, _frame: u64) -> InputIntent {
        while let Some(step) = self.steps.get(self.cursor) {
            if self.used < step.repeat {
                self.used += 1;
                return step.intent;
            }
            self.cursor += 1;
            self.used = 0;
        }
        InputIntent::escape()
    }
}

pub struct ScriptLoader {
    base_dir: PathBuf,
}

impl ScriptLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<ScriptedInput> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input script {}", path.display()))?;
        ScriptedInput::from_yaml(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_directions_cancel() {
        let intent = InputIntent {
            left: true,
            right: true,
            up: true,
            ..InputIntent::default()
        };
        assert_eq!(intent.direction(), (0.0, -1.0));
    }

    #[test]
    fn script_replays_steps_then_escapes() {
        let mut script = ScriptedInput::from_yaml(
            "- right: true\n  repeat: 2\n- down: true\n  pave: true\n",
        )
        .unwrap();

        let right = script.next_intent(0);
        assert!(right.right && !right.escape);
        assert!(script.next_intent(1).right);
        let down = script.next_intent(2);
        assert!(down.down && down.pave && !down.right);
        assert!(script.is_exhausted());
        assert!(script.next_intent(3).escape);
        assert!(script.next_intent(4).escape);
    }

    #[test]
    fn zero_repeat_steps_are_skipped() {
        let mut script = ScriptedInput::new(vec![
            ScriptStep {
                intent: InputIntent {
                    up: true,
                    ..InputIntent::default()
                },
                repeat: 0,
            },
            ScriptStep {
                intent: InputIntent::idle(),
                repeat: 1,
            },
        ]);
        assert!(!script.is_exhausted());
        assert_eq!(script.next_intent(0), InputIntent::idle());
        assert!(script.is_exhausted());
    }

    #[test]
    fn closures_are_input_sources() {
        let mut source = |frame: u64| InputIntent {
            right: frame % 2 == 0,
            ..InputIntent::default()
        };
        assert!(source.next_intent(0).right);
        assert!(!source.next_intent(1).right);
    }
}
