use tokio::sync::broadcast;
use tracing::debug;

/// Authentication lifecycle event broadcast to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    AuthSucceeded,
    LoggedOut,
}

/// Broadcasts [`AuthEvent`]s to every subscriber.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Send `event`, returning how many observers received it.
    pub fn notify(&self, event: AuthEvent) -> usize {
        let delivered = self.tx.send(event).unwrap_or(0);
        debug!(?event, delivered, "auth event broadcast");
        delivered
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}
