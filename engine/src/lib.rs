pub mod config;
pub mod defaults;
pub mod game;
pub mod logger;
pub mod replay;
pub mod session;
pub mod version;

pub use game::{
    Direction, GameEngine, GameOverReason, GameRng, GameSnapshot, GameStatus, Point, TickEvent,
};
pub use session::{GameSession, SessionCommand, SessionHandle, SnapshotObserver, Ticker};
