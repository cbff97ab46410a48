use crate::game::{GameEngine, GameRng, GameSnapshot, TickEvent};
use super::{Replay, ReplayAction, ReplayActionKind};

/// Re-runs a recorded session tick by tick from its seed.
pub struct ReplayPlayer {
    engine: GameEngine,
    actions: Vec<ReplayAction>,
    next_action: usize,
    step: u64,
    total_steps: u64,
}

impl ReplayPlayer {
    pub fn new(replay: &Replay) -> Result<Self, String> {
        let engine = GameEngine::new(replay.grid_size, GameRng::new(replay.seed))?;
        Ok(Self {
            engine,
            actions: replay.actions.clone(),
            next_action: 0,
            step: 0,
            total_steps: replay.total_steps,
        })
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.total_steps
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    /// Applies the inputs recorded before the next tick, then runs it.
    /// `None` once every recorded tick has been played.
    pub fn advance(&mut self) -> Option<TickEvent> {
        self.apply_pending_actions();
        if self.is_finished() {
            return None;
        }
        self.step += 1;
        Some(self.engine.advance())
    }

    pub fn run_to_end(mut self) -> GameSnapshot {
        while self.advance().is_some() {}
        self.engine.snapshot()
    }

    fn apply_pending_actions(&mut self) {
        while let Some(action) = self.actions.get(self.next_action) {
            if action.step != self.step {
                break;
            }
            match action.kind {
                ReplayActionKind::Turn(direction) => {
                    self.engine.set_direction(direction);
                }
                ReplayActionKind::Reset => self.engine.reset(),
            }
            self.next_action += 1;
        }
    }
}
