//! REST API access: client, request authentication, session events

pub mod authenticator;
pub mod client;
pub mod events;

pub use authenticator::{Access, RequestAuthenticator};
pub use client::ApiClient;
pub use events::{SessionEvent, SessionEvents};
