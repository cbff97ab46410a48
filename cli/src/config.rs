use serde::{Deserialize, Serialize};
use snake_engine::config::{Validate, validate_grid_size, validate_tick_interval_ms};
use snake_engine::defaults::{DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_size: usize,
    pub tick_interval_ms: u64,
    /// Fixed seed for reproducible games; a random one is drawn when absent.
    pub seed: Option<u64>,
    pub replay: ReplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            seed: None,
            replay: ReplayConfig::default(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        validate_grid_size(self.grid_size)?;
        validate_tick_interval_ms(self.tick_interval_ms)?;
        self.replay.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            save: false,
            location: "replays".to_string(),
        }
    }
}

impl Validate for ReplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.save && self.location.trim().is_empty() {
            return Err("Replay location must be set when saving replays".to_string());
        }
        Ok(())
    }
}
