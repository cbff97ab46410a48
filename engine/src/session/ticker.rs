use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Fixed-rate tick source that can be stopped and restarted.
pub struct Ticker {
    period: Duration,
    timer: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, timer: None }
    }

    /// (Re)starts ticking; the first tick fires one full period from now.
    pub fn start_ticking(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn stop_ticking(&mut self) {
        self.timer = None;
    }

    /// Resolves on the next tick. Never resolves while stopped.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
