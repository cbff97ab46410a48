use std::path::Path;

use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION, Replay};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    DecodeError(serde_yaml_ng::Error),
    EncodeError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    InvalidActions(String),
    EmptyFile,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::DecodeError(e) => write!(f, "Decode error: {}", e),
            ReplayError::EncodeError(e) => write!(f, "Encode error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
            ReplayError::InvalidActions(e) => write!(f, "Invalid replay actions: {}", e),
            ReplayError::EmptyFile => write!(f, "Empty replay file"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

pub fn save_replay_to_string(replay: &Replay) -> Result<String, ReplayError> {
    serde_yaml_ng::to_string(replay).map_err(ReplayError::EncodeError)
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let content = save_replay_to_string(replay)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_replay_from_str(content: &str) -> Result<Replay, ReplayError> {
    if content.trim().is_empty() {
        return Err(ReplayError::EmptyFile);
    }

    let replay: Replay = serde_yaml_ng::from_str(content).map_err(ReplayError::DecodeError)?;
    if replay.version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.version,
            expected: REPLAY_VERSION,
        });
    }
    validate_actions(&replay)?;
    Ok(replay)
}

// The player applies actions in a single forward pass, so anything out of
// order or past the last tick would be skipped silently.
fn validate_actions(replay: &Replay) -> Result<(), ReplayError> {
    let mut previous_step = 0;
    for (index, action) in replay.actions.iter().enumerate() {
        if action.step < previous_step {
            return Err(ReplayError::InvalidActions(format!(
                "action {} at step {} comes after step {}",
                index, action.step, previous_step
            )));
        }
        if action.step > replay.total_steps {
            return Err(ReplayError::InvalidActions(format!(
                "action {} at step {} is past the last step {}",
                index, action.step, replay.total_steps
            )));
        }
        previous_step = action.step;
    }
    Ok(())
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    load_replay_from_str(&content)
}

pub fn generate_replay_filename(version: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    let sanitized_version = version.replace('.', "_");
    format!("{}_SNAKE_{}.{}", timestamp, sanitized_version, REPLAY_FILE_EXTENSION)
}
