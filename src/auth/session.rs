//! Session management
//!
//! The [`SessionStore`] is the single owner of the signed-in state. Every
//! consumer reads it through [`SessionStore::current_session`]; only
//! [`SessionStore::login`], [`SessionStore::logout`] and
//! [`SessionStore::invalidate`] write it. A login reaches the durable
//! [`SessionStorage`] before memory and is undone there if it only half lands;
//! ending a session clears memory first.

use crate::auth::models::Role;
use crate::auth::storage::{MemoryStorage, SessionStorage, ROLE_KEY, TOKEN_KEY};
use crate::error::{Error, Result};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Snapshot of the client's authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    role: Option<Role>,
}

impl Session {
    /// A logged-out session
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// True exactly when a token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Process-wide session store. Clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Build a store, initialising it from whatever `storage` holds.
    ///
    /// The persisted token is not checked against the server; a stale token
    /// stays signed in until the first request is rejected.
    pub fn restore(storage: impl SessionStorage + 'static) -> Result<Self> {
        let token = storage.get(TOKEN_KEY)?;
        let role = storage.get(ROLE_KEY)?;

        let session = match (token, role) {
            (Some(token), Some(role)) if !token.is_empty() => match role.parse::<Role>() {
                Ok(role) => {
                    debug!("Restored {} session from storage", role);
                    Session::authenticated(token, role)
                }
                Err(_) => {
                    warn!("Ignoring persisted session with unknown role '{}'", role);
                    Session::anonymous()
                }
            },
            (None, None) => Session::anonymous(),
            _ => {
                warn!("Ignoring incomplete persisted session");
                Session::anonymous()
            }
        };

        Ok(Self {
            state: Arc::new(RwLock::new(session)),
            storage: Arc::new(storage),
        })
    }

    /// A store backed by fresh in-memory storage
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::anonymous())),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// Current in-memory state
    pub fn current_session(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token to present as a bearer credential, if signed in
    pub fn token(&self) -> Option<String> {
        self.current_session().token
    }

    /// Sign in with a token issued by the server
    pub fn login(&self, token: impl Into<String>, role: Role) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::validation("token", "Token must not be empty"));
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.storage.set(TOKEN_KEY, &token)?;
        if let Err(e) = self.storage.set(ROLE_KEY, role.as_str()) {
            self.restore_persisted(&state);
            return Err(e);
        }
        *state = Session::authenticated(token, role);

        info!("Signed in as {}", role);
        Ok(())
    }

    /// Sign out. Returns whether a session was actually ended; calling it
    /// while signed out changes nothing.
    pub fn logout(&self) -> Result<bool> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.end(&mut state)
    }

    /// Sign out only if `token` is still the current credential.
    ///
    /// Used when the server rejects a request: the rejection refers to the token
    /// that request carried, so a newer session must survive it.
    pub fn invalidate(&self, token: &str) -> Result<bool> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.token.as_deref() != Some(token) {
            return Ok(false);
        }
        self.end(&mut state)
    }

    /// Put the token key back to `previous` after the role write failed.
    /// The role key still holds whatever `previous` persisted.
    fn restore_persisted(&self, previous: &Session) {
        let restored = match previous.token() {
            Some(token) => self.storage.set(TOKEN_KEY, token),
            None => self.storage.remove(TOKEN_KEY),
        };

        if let Err(e) = restored {
            warn!("Failed to restore persisted session, clearing it: {}", e);
            // a token paired with the wrong role must not survive a restart
            let _ = self.storage.remove(TOKEN_KEY);
            let _ = self.storage.remove(ROLE_KEY);
        }
    }

    fn end(&self, state: &mut Session) -> Result<bool> {
        let was_authenticated = state.is_authenticated();
        // memory is cleared even if storage fails, so a rejected token ends once
        *state = Session::anonymous();
        if was_authenticated {
            info!("Signed out");
        }

        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ROLE_KEY)?;
        Ok(was_authenticated)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.current_session();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .field("role", &session.role())
            .finish()
    }
}
