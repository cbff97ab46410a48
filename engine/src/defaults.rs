use std::time::Duration;

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const MIN_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 100;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(150);
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
pub const MAX_TICK_INTERVAL_MS: u64 = 5000;

pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const FOOD_SCORE: u32 = 10;

/// Rejection-sampling draws per grid cell before food spawning falls back to
/// enumerating free cells.
pub const FOOD_DRAWS_PER_CELL: usize = 8;
