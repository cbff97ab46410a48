use crate::defaults::{MAX_GRID_SIZE, MAX_TICK_INTERVAL_MS, MIN_GRID_SIZE, MIN_TICK_INTERVAL_MS};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn validate_grid_size(grid_size: usize) -> Result<(), String> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
        return Err(format!(
            "Grid size must be between {} and {}, got {}",
            MIN_GRID_SIZE, MAX_GRID_SIZE, grid_size
        ));
    }
    Ok(())
}

pub fn validate_tick_interval_ms(tick_interval_ms: u64) -> Result<(), String> {
    if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&tick_interval_ms) {
        return Err(format!(
            "Tick interval must be between {}ms and {}ms, got {}ms",
            MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, tick_interval_ms
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_bounds() {
        assert!(validate_grid_size(MIN_GRID_SIZE).is_ok());
        assert!(validate_grid_size(20).is_ok());
        assert!(validate_grid_size(MAX_GRID_SIZE).is_ok());
        assert!(validate_grid_size(MIN_GRID_SIZE - 1).is_err());
        assert!(validate_grid_size(MAX_GRID_SIZE + 1).is_err());
    }

    #[test]
    fn test_tick_interval_bounds() {
        assert!(validate_tick_interval_ms(150).is_ok());
        assert!(validate_tick_interval_ms(10).is_err());
        assert!(validate_tick_interval_ms(10_000).is_err());
    }
}
