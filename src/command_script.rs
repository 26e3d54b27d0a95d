use anyhow::Result;
use library_core::SimTick;
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path, str::FromStr};
use thiserror::Error;

/// A single session command, as typed in scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Primary interaction on the object carrying this label.
    Touch(String),
    /// Dismiss the story modal.
    CloseStory,
    /// Log the puzzle snapshot.
    Status,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` expects {1}")]
    Usage(&'static str, &'static str),
    #[error("no scene object labeled `{0}`")]
    UnknownLabel(String),
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let name = parts.next().ok_or(CommandError::Empty)?;
        let rest: Vec<&str> = parts.collect();
        match (name, rest.as_slice()) {
            ("touch", [label]) => Ok(Self::Touch((*label).to_string())),
            ("touch", _) => Err(CommandError::Usage("touch", "exactly one label")),
            ("close-story", []) => Ok(Self::CloseStory),
            ("close-story", _) => Err(CommandError::Usage("close-story", "no arguments")),
            ("status", []) => Ok(Self::Status),
            ("status", _) => Err(CommandError::Usage("status", "no arguments")),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommandScriptFile {
    steps: Vec<CommandScriptStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommandScriptStepDef {
    tick: u64,
    command: String,
}

#[derive(Debug, Clone)]
struct CommandScriptStep {
    tick: SimTick,
    command: SessionCommand,
}

/// Deterministic command script runner.
///
/// Scripts are a simple list of `{tick, command}` steps, executed in file order.
/// Every command is parsed up front so a typo fails before the session starts.
#[derive(Debug)]
pub struct CommandScriptPlayer {
    pending: VecDeque<CommandScriptStep>,
}

impl CommandScriptPlayer {
    /// Load a command script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a command script from an in-memory JSON string.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: CommandScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("command script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for (index, step) in file.steps.into_iter().enumerate() {
            let command = step
                .command
                .parse::<SessionCommand>()
                .map_err(|err| anyhow::anyhow!("step {index}: {err}"))?;

            if let Some(prev) = last_tick {
                if step.tick < prev {
                    anyhow::bail!("command script steps must be sorted by tick");
                }
            }
            last_tick = Some(step.tick);

            pending.push_back(CommandScriptStep {
                tick: SimTick(step.tick),
                command,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all commands scheduled for ticks `<= tick`.
    pub fn drain_ready_commands(&mut self, tick: SimTick) -> Vec<SessionCommand> {
        let mut commands = Vec::new();
        while self.pending.front().is_some_and(|step| step.tick <= tick) {
            if let Some(step) = self.pending.pop_front() {
                commands.push(step.command);
            }
        }
        commands
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert_eq!(
            "touch key_book_1".parse(),
            Ok(SessionCommand::Touch("key_book_1".into()))
        );
        assert_eq!("  close-story ".parse(), Ok(SessionCommand::CloseStory));
        assert_eq!("status".parse(), Ok(SessionCommand::Status));
        assert_eq!("".parse::<SessionCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "touch".parse::<SessionCommand>(),
            Err(CommandError::Usage("touch", "exactly one label"))
        );
        assert_eq!(
            "dance".parse::<SessionCommand>(),
            Err(CommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn command_script_rejects_unsorted_ticks() {
        let json = r#"{
            "steps": [
                {"tick": 2, "command": "status"},
                {"tick": 1, "command": "touch central_book"}
            ]
        }"#;
        let err = CommandScriptPlayer::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains("sorted by tick"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn command_script_rejects_unknown_commands() {
        let json = r#"{"steps": [{"tick": 0, "command": "/time set 0"}]}"#;
        let err = CommandScriptPlayer::from_json(json).unwrap_err();
        assert!(err.to_string().contains("step 0"), "unexpected error: {err:#}");
    }

    #[test]
    fn command_script_drains_in_order_and_is_deterministic() {
        let json = r#"{
            "steps": [
                {"tick": 1, "command": "touch central_book"},
                {"tick": 1, "command": "status"},
                {"tick": 3, "command": "touch key_book_0"}
            ]
        }"#;
        let mut script = CommandScriptPlayer::from_json(json).expect("script should parse");

        assert!(script.drain_ready_commands(SimTick(0)).is_empty());
        assert_eq!(
            script.drain_ready_commands(SimTick(1)),
            vec![
                SessionCommand::Touch("central_book".into()),
                SessionCommand::Status
            ]
        );
        assert!(script.drain_ready_commands(SimTick(2)).is_empty());
        assert_eq!(
            script.drain_ready_commands(SimTick(3)),
            vec![SessionCommand::Touch("key_book_0".into())]
        );
        assert!(script.is_finished());
    }
}
