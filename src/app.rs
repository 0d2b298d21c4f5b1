//! Application context
//!
//! Wires the shared pieces together once and hands them to every consumer
//! explicitly: one session store, one authenticated API client, one navigator
//! listening for session events, one product slice.

use tokio::task::JoinHandle;

use crate::api::{ApiClient, RequestAuthenticator, SessionEvents};
use crate::auth::{FileStorage, SessionStorage, SessionStore};
use crate::config::Config;
use crate::error::Result;
use crate::products::ProductSlice;
use crate::routes::{Navigator, Router};

pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    pub events: SessionEvents,
    pub api: ApiClient,
    pub navigator: Navigator,
    pub products: ProductSlice,
    watcher: JoinHandle<()>,
}

impl AppContext {
    /// Build the context with the file storage named in `config`.
    /// Must be called inside a tokio runtime.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = FileStorage::new(config.storage.path.clone());
        Self::with_storage(config, storage)
    }

    /// Build the context on top of any durable storage
    pub fn with_storage(config: Config, storage: impl SessionStorage + 'static) -> Result<Self> {
        let session = SessionStore::restore(storage)?;
        let events = SessionEvents::new();

        let authenticator = RequestAuthenticator::new(session.clone(), events.clone());
        let api = ApiClient::new(config.api.base_url.clone(), authenticator);
        let navigator = Navigator::new(Router::default(), session.clone());
        let watcher = navigator.watch(events.subscribe());
        let products = ProductSlice::new(api.clone());

        Ok(Self {
            config,
            session,
            events,
            api,
            navigator,
            products,
            watcher,
        })
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
