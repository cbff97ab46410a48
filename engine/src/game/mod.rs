mod engine;
mod rng;
mod snake;
mod snapshot;
mod types;

pub use engine::GameEngine;
pub use rng::GameRng;
pub use snake::Snake;
pub use snapshot::{GameSnapshot, TickEvent};
pub use types::{Direction, GameOverReason, GameStatus, Point};
