//! Request authentication
//!
//! Attaches the current token to outgoing requests and, when the server
//! answers 401, ends the session that token belonged to and announces it on
//! [`SessionEvents`]. The failure itself is still returned to the caller.

use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, warn};

use crate::api::events::{SessionEvent, SessionEvents};
use crate::auth::SessionStore;

/// Whether an endpoint expects the bearer credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Sign-in and registration: sent without a token, a 401 means bad input
    Public,
    /// Everything else
    Authenticated,
}

#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    session: SessionStore,
    events: SessionEvents,
}

impl RequestAuthenticator {
    pub fn new(session: SessionStore, events: SessionEvents) -> Self {
        Self { session, events }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Attach the bearer token if the endpoint needs one and a session exists.
    /// Returns the token that was sent so the response can be matched to it.
    pub fn authorize(
        &self,
        request: RequestBuilder,
        access: Access,
    ) -> (RequestBuilder, Option<String>) {
        if access == Access::Public {
            return (request, None);
        }

        match self.session.token() {
            Some(token) => (request.bearer_auth(&token), Some(token)),
            None => {
                debug!("No session, sending request unauthenticated");
                (request, None)
            }
        }
    }

    /// Inspect a response status. On 401 for a request that carried `sent_token`,
    /// end that session and publish [`SessionEvent::Invalidated`].
    ///
    /// Returns true when this call ended the session. Concurrent rejections of
    /// the same token end it once.
    pub fn observe(&self, status: StatusCode, sent_token: Option<&str>) -> bool {
        if status != StatusCode::UNAUTHORIZED {
            return false;
        }
        let Some(token) = sent_token else {
            return false;
        };

        match self.session.invalidate(token) {
            Ok(true) => {
                warn!("Server rejected the session token, signing out");
                self.events.publish(SessionEvent::Invalidated);
                true
            }
            Ok(false) => false,
            Err(e) => {
                // signed out in memory; only the persisted keys may linger
                warn!("Failed to clear rejected session: {}", e);
                self.events.publish(SessionEvent::Invalidated);
                true
            }
        }
    }
}
