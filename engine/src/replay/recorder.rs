use chrono::Local;

use crate::game::Direction;
use super::{REPLAY_VERSION, Replay, ReplayAction, ReplayActionKind};

pub struct ReplayRecorder {
    engine_version: String,
    started_timestamp_ms: i64,
    seed: u64,
    grid_size: usize,
    actions: Vec<ReplayAction>,
}

impl ReplayRecorder {
    pub fn new(engine_version: String, seed: u64, grid_size: usize) -> Self {
        Self {
            engine_version,
            started_timestamp_ms: Local::now().timestamp_millis(),
            seed,
            grid_size,
            actions: Vec::new(),
        }
    }

    pub fn record_turn(&mut self, step: u64, direction: Direction) {
        self.actions.push(ReplayAction {
            step,
            kind: ReplayActionKind::Turn(direction),
        });
    }

    pub fn record_reset(&mut self, step: u64) {
        self.actions.push(ReplayAction {
            step,
            kind: ReplayActionKind::Reset,
        });
    }

    pub fn finalize(&mut self, total_steps: u64) -> Replay {
        // Stable sort: actions sharing a step keep their arrival order.
        let mut actions = std::mem::take(&mut self.actions);
        actions.sort_by_key(|a| a.step);

        Replay {
            version: REPLAY_VERSION,
            engine_version: std::mem::take(&mut self.engine_version),
            started_timestamp_ms: self.started_timestamp_ms,
            seed: self.seed,
            grid_size: self.grid_size,
            total_steps,
            actions,
        }
    }
}
