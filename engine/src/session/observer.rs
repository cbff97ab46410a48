use std::future::Future;
use tokio::sync::mpsc;

use crate::game::{GameSnapshot, TickEvent};

/// Renderer side of a session. Observers get owned snapshots and never touch
/// the engine itself.
pub trait SnapshotObserver: Send + Sync + Clone + 'static {
    fn on_tick(&self, event: TickEvent, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn on_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn on_reset(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Tick { event: TickEvent, snapshot: GameSnapshot },
    GameOver(GameSnapshot),
    Reset(GameSnapshot),
}

/// Forwards every notification into a channel for consumers that prefer
/// polling over callbacks.
#[derive(Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelObserver {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn forward(&self, event: SessionEvent) {
        // A dropped receiver only means nobody is watching any more.
        let _ = self.sender.send(event);
    }
}

impl SnapshotObserver for ChannelObserver {
    async fn on_tick(&self, event: TickEvent, snapshot: GameSnapshot) {
        self.forward(SessionEvent::Tick { event, snapshot });
    }

    async fn on_game_over(&self, snapshot: GameSnapshot) {
        self.forward(SessionEvent::GameOver(snapshot));
    }

    async fn on_reset(&self, snapshot: GameSnapshot) {
        self.forward(SessionEvent::Reset(snapshot));
    }
}
