mod file_io;
mod player;
mod recorder;

pub use file_io::{
    ReplayError, generate_replay_filename, load_replay, load_replay_from_str, save_replay,
    save_replay_to_string,
};
pub use player::ReplayPlayer;
pub use recorder::ReplayRecorder;

use serde::{Deserialize, Serialize};

use crate::game::Direction;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;

/// Everything needed to rebuild a session: the engine seed plus every
/// accepted input, keyed by the number of ticks that had run before it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub version: u8,
    pub engine_version: String,
    pub started_timestamp_ms: i64,
    pub seed: u64,
    pub grid_size: usize,
    pub total_steps: u64,
    pub actions: Vec<ReplayAction>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    pub step: u64,
    pub kind: ReplayActionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayActionKind {
    Turn(Direction),
    Reset,
}
