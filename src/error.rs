//! Error types for Storefront

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Client-side field check failed; never reaches the network
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    /// The server rejected the credential (HTTP 401)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Stale optimistic-concurrency marker (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-2xx response, or a response body we could not use
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Product '{0}' not found")]
    ProductNotFound(String),
}

impl Error {
    /// Build a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Message supplied by the server in the response body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Server { message, .. } if !message.is_empty() => Some(message.as_str()),
            Error::Conflict(message) | Error::Authentication(message) if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Server {
                status: err.status().map(|s| s.as_u16()).unwrap_or(200),
                message: format!("Unexpected response body: {}", err),
            }
        } else {
            Error::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
