mod config;
mod input;
mod renderer;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate};
use snake_engine::replay::{ReplayPlayer, generate_replay_filename, load_replay, save_replay};
use snake_engine::version::VERSION;
use snake_engine::{GameEngine, GameRng, GameSession, SessionHandle, log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use config::Config;
use input::{InputCommand, parse_input};
use renderer::{TextRenderer, render_board};

#[derive(Parser)]
#[command(name = "touch_snake", version, about = "Snake on a grid, driven from the terminal")]
struct Args {
    /// YAML settings file; defaults are used when it does not exist.
    #[arg(long, default_value = "touch_snake.yaml")]
    config: PathBuf,

    #[arg(long)]
    grid_size: Option<usize>,

    #[arg(long)]
    tick_ms: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Play a saved replay without input and print the final board.
    #[arg(long)]
    replay: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, mut config: Config) -> Result<Config, String> {
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    if let Some(ref path) = args.replay {
        return play_replay(path);
    }

    let config_manager: ConfigManager<FileContentConfigProvider, Config> =
        ConfigManager::from_yaml_file(args.config.clone());
    let config = args.apply_overrides(config_manager.get_config()?)?;

    let seed = config.seed.unwrap_or_else(|| GameRng::from_random().seed());
    log!(
        "Starting a {0}x{0} game, tick {1}ms, seed {2}",
        config.grid_size,
        config.tick_interval_ms,
        seed
    );

    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let (session, handle) = if config.replay.save {
        GameSession::recorded(config.grid_size, seed, tick_interval)?
    } else {
        let engine = GameEngine::new(config.grid_size, GameRng::new(seed))?;
        GameSession::new(engine, tick_interval)
    };

    println!("Controls: w/a/s/d or up/down/left/right, r to restart, q to quit.");
    let session_task = tokio::spawn(session.run(TextRenderer::new()));
    let input_task = tokio::spawn(read_input(handle));

    let summary = session_task.await?;
    input_task.await?;

    log!(
        "Finished {} games, best score {}",
        summary.games_finished,
        summary.best_score.max(summary.final_snapshot.score)
    );

    if let Some(replay) = summary.replay {
        let replay_dir = Path::new(&config.replay.location);
        if let Err(e) = std::fs::create_dir_all(replay_dir) {
            log!("Failed to create replay directory: {}", e);
        } else {
            let file_path = replay_dir.join(generate_replay_filename(VERSION));
            match save_replay(&file_path, &replay) {
                Ok(_) => log!("Replay saved to: {}", file_path.display()),
                Err(e) => log!("Failed to save replay: {}", e),
            }
        }
    }

    Ok(())
}

/// Turns stdin lines into session commands until the player quits or stdin
/// closes; either way the session is told to shut down.
async fn read_input(handle: SessionHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log!("Failed to read input: {}", e);
                break;
            }
        };

        let delivered = match parse_input(&line) {
            Some(InputCommand::Turn(direction)) => handle.turn(direction),
            Some(InputCommand::Reset) => handle.reset(),
            Some(InputCommand::Quit) => break,
            None => true,
        };
        if !delivered {
            return;
        }
    }

    handle.shutdown();
}

fn play_replay(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let replay = load_replay(path)?;
    log!(
        "Playing replay from engine {} (seed {}, {} steps, {} inputs)",
        replay.engine_version,
        replay.seed,
        replay.total_steps,
        replay.actions.len()
    );

    let player = ReplayPlayer::new(&replay)?;
    let total_steps = player.total_steps();
    let snapshot = player.run_to_end();
    println!("Replayed {} steps.", total_steps);
    println!("{}", render_board(&snapshot));
    if let Some(reason) = snapshot.game_over_reason() {
        println!("GAME OVER: snake {}.", reason);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["touch_snake"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_flags_override_file_values() {
        let config = args(&["--grid-size", "12", "--tick-ms", "200", "--seed", "4"])
            .apply_overrides(Config::default())
            .unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_missing_flags_keep_file_values() {
        let file_config = Config {
            grid_size: 25,
            seed: Some(8),
            ..Config::default()
        };
        let config = args(&[]).apply_overrides(file_config.clone()).unwrap();
        assert_eq!(config, file_config);
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        assert!(args(&["--grid-size", "2"]).apply_overrides(Config::default()).is_err());
    }
}
