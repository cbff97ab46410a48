mod observer;
mod ticker;

pub use observer::{ChannelObserver, SessionEvent, SnapshotObserver};
pub use ticker::Ticker;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::game::{Direction, GameEngine, GameRng, GameSnapshot};
use crate::replay::{Replay, ReplayRecorder};
use crate::version::VERSION;
use crate::{log, log_verbose};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Reset,
    Shutdown,
}

/// Input side of a running session. Cheap to clone; every method returns
/// `false` once the session has stopped.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn turn(&self, direction: Direction) -> bool {
        self.send(SessionCommand::Turn(direction))
    }

    pub fn reset(&self) -> bool {
        self.send(SessionCommand::Reset)
    }

    pub fn shutdown(&self) -> bool {
        self.send(SessionCommand::Shutdown)
    }
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub final_snapshot: GameSnapshot,
    pub games_finished: u32,
    pub best_score: u32,
    pub replay: Option<Replay>,
}

/// Drives a `GameEngine` from a fixed-rate ticker. The session task is the
/// only owner of the engine; input arrives through its `SessionHandle` and is
/// applied between ticks.
pub struct GameSession {
    engine: GameEngine,
    ticker: Ticker,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    recorder: Option<ReplayRecorder>,
    steps: u64,
    games_finished: u32,
    best_score: u32,
}

enum Wakeup {
    Tick,
    Command(Option<SessionCommand>),
}

impl GameSession {
    pub fn new(engine: GameEngine, tick_interval: Duration) -> (Self, SessionHandle) {
        let (sender, commands) = mpsc::unbounded_channel();
        let session = Self {
            engine,
            ticker: Ticker::new(tick_interval),
            commands,
            recorder: None,
            steps: 0,
            games_finished: 0,
            best_score: 0,
        };
        (session, SessionHandle { commands: sender })
    }

    /// A session on a fresh seeded game that records its inputs, so the run
    /// can be played back from `seed` alone.
    pub fn recorded(
        grid_size: usize,
        seed: u64,
        tick_interval: Duration,
    ) -> Result<(Self, SessionHandle), String> {
        let engine = GameEngine::new(grid_size, GameRng::new(seed))?;
        let (mut session, handle) = Self::new(engine, tick_interval);
        session.recorder = Some(ReplayRecorder::new(VERSION.to_string(), seed, grid_size));
        Ok((session, handle))
    }

    pub async fn run(mut self, observer: impl SnapshotObserver) -> SessionSummary {
        if !self.engine.is_over() {
            self.ticker.start_ticking();
        }

        loop {
            let wakeup = tokio::select! {
                _ = self.ticker.tick() => Wakeup::Tick,
                command = self.commands.recv() => Wakeup::Command(command),
            };

            match wakeup {
                Wakeup::Tick => self.on_tick(&observer).await,
                Wakeup::Command(Some(SessionCommand::Turn(direction))) => {
                    if self.engine.set_direction(direction) {
                        if let Some(ref mut recorder) = self.recorder {
                            recorder.record_turn(self.steps, direction);
                        }
                    } else {
                        log_verbose!("Ignored turn {:?} at step {}", direction, self.steps);
                    }
                }
                Wakeup::Command(Some(SessionCommand::Reset)) => {
                    self.engine.reset();
                    if let Some(ref mut recorder) = self.recorder {
                        recorder.record_reset(self.steps);
                    }
                    self.ticker.start_ticking();
                    observer.on_reset(self.engine.snapshot()).await;
                }
                Wakeup::Command(Some(SessionCommand::Shutdown)) | Wakeup::Command(None) => break,
            }
        }

        self.ticker.stop_ticking();
        log!(
            "Session stopped after {} steps, {} finished games, best score {}",
            self.steps,
            self.games_finished,
            self.best_score
        );

        let steps = self.steps;
        SessionSummary {
            final_snapshot: self.engine.snapshot(),
            games_finished: self.games_finished,
            best_score: self.best_score,
            replay: self.recorder.take().map(|mut recorder| recorder.finalize(steps)),
        }
    }

    async fn on_tick(&mut self, observer: &impl SnapshotObserver) {
        let event = self.engine.advance();
        self.steps += 1;
        let snapshot = self.engine.snapshot();
        observer.on_tick(event, snapshot.clone()).await;

        if event.ended_game() {
            self.ticker.stop_ticking();
            self.games_finished += 1;
            self.best_score = self.best_score.max(snapshot.score);
            observer.on_game_over(snapshot).await;
        }
    }
}
