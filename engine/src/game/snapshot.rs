use serde::{Deserialize, Serialize};

use super::types::{Direction, GameOverReason, GameStatus, Point};

/// Read-only copy of the game handed to renderers after each tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid_size: usize,
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub tick: u64,
}

impl GameSnapshot {
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::Over(reason) => Some(reason),
        }
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}

/// What a single `advance` changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// The snake moved without eating; `vacated` is the freed tail cell.
    Moved { head: Point, vacated: Point },
    /// The snake ate and grew by one; `food` is the replacement.
    Ate { head: Point, score: u32, food: Option<Point> },
    /// This tick ended the game.
    GameOver { reason: GameOverReason },
    /// The game was already over; nothing changed.
    Frozen { reason: GameOverReason },
}

impl TickEvent {
    pub fn ended_game(&self) -> bool {
        matches!(self, TickEvent::GameOver { .. })
    }
}
