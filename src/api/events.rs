//! Session lifecycle notifications
//!
//! The request authenticator publishes here when the server rejects the
//! current credential; the navigator subscribes and sends the client back to
//! sign-in. Neither side knows about the other.

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 16;

/// Something that happened to the session outside of an explicit sign-in/out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the session's token and the session was ended
    Invalidated,
}

/// Broadcast hub for [`SessionEvent`]s. Clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish to every current subscriber. Having none is not an error.
    pub fn publish(&self, event: SessionEvent) {
        match self.tx.send(event) {
            Ok(n) => debug!("Session event delivered to {} subscriber(s)", n),
            Err(broadcast::error::SendError(event)) => {
                debug!("No subscribers for {:?}", event)
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
