//! Storefront - sign in, browse and manage products against a REST backend
//!
//! This is the library interface for Storefront: the persisted session store,
//! the request authenticator, the role-based route guard and the product
//! state slice, wired together by [`app::AppContext`].

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod products;
pub mod routes;

pub use app::AppContext;
pub use config::Config;
pub use error::Error;
