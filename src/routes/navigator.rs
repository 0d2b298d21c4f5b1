//! Client navigation state
//!
//! The navigator owns the current location. It follows guard redirects until
//! something renders, and listens for [`SessionEvent::Invalidated`] to send the
//! client back to sign-in when the server rejects its token.

use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::SessionEvent;
use crate::auth::SessionStore;
use crate::routes::router::{Destination, RedirectReason, Resolution, Router};

/// Guard redirects always land on a public page or a role's own landing page,
/// so a well-formed table settles within a couple of hops
const MAX_REDIRECTS: usize = 4;

/// One hop taken while resolving a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: Destination,
    pub reason: RedirectReason,
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub rendered: Destination,
    pub redirects: Vec<Redirect>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

#[derive(Debug, Default)]
struct Location {
    current: Option<Destination>,
    history: Vec<Destination>,
}

/// Clones share the same location
#[derive(Debug, Clone)]
pub struct Navigator {
    router: Arc<Router>,
    session: SessionStore,
    location: Arc<RwLock<Location>>,
}

impl Navigator {
    pub fn new(router: Router, session: SessionStore) -> Self {
        Self {
            router: Arc::new(router),
            session,
            location: Arc::new(RwLock::new(Location::default())),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current(&self) -> Option<Destination> {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
    }

    /// Every destination rendered so far, oldest first
    pub fn history(&self) -> Vec<Destination> {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .history
            .clone()
    }

    /// Navigate to `path`, re-running the guard against the current session
    pub fn navigate(&self, path: &str) -> Navigation {
        let session = self.session.current_session();
        let mut redirects = Vec::new();
        let mut resolution = self.router.resolve(path, &session);

        let rendered = loop {
            match resolution {
                Resolution::Render(destination) => break destination,
                Resolution::Redirect { to, reason } => {
                    let from = redirects
                        .last()
                        .map(|r: &Redirect| r.to.path().to_string())
                        .unwrap_or_else(|| path.to_string());
                    redirects.push(Redirect { from, to, reason });
                    if redirects.len() >= MAX_REDIRECTS {
                        warn!("Redirect limit reached from {}, showing sign-in", path);
                        break Destination::SignIn;
                    }
                    resolution = self.router.resolve(to.path(), &session);
                }
            }
        };

        self.show(rendered);
        Navigation { rendered, redirects }
    }

    /// React to a session event. An invalidation that arrives after a new
    /// sign-in is stale and leaves the location alone.
    pub fn handle(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Invalidated => {
                if self.session.current_session().is_authenticated() {
                    debug!("Ignoring invalidation, a new session is active");
                    return;
                }
                info!("Session invalidated, returning to {}", Destination::SignIn);
                self.show(Destination::SignIn);
            }
        }
    }

    /// Apply events from `events` until the channel closes
    pub fn watch(&self, mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
        let navigator = self.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => navigator.handle(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Navigator missed {} session event(s)", skipped);
                        // a missed invalidation still has to land on sign-in
                        navigator.handle(&SessionEvent::Invalidated);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn show(&self, destination: Destination) {
        let mut location = self.location.write().unwrap_or_else(PoisonError::into_inner);
        location.current = Some(destination);
        location.history.push(destination);
    }
}
