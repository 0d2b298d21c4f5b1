//! Sign-in flow

use tracing::info;

use crate::api::ApiClient;
use crate::auth::models::Credentials;
use crate::auth::session::SessionStore;
use crate::error::{Error, Result};
use crate::routes::{landing_for, Destination};

/// Exchange credentials for a token, start the session, and return the role's
/// landing page
pub async fn sign_in(
    api: &ApiClient,
    session: &SessionStore,
    user_name: &str,
    password: &str,
) -> Result<Destination> {
    if user_name.trim().is_empty() {
        return Err(Error::validation("user_name", "Username is required"));
    }
    if password.is_empty() {
        return Err(Error::validation("password", "Password is required"));
    }

    let credentials = Credentials {
        user_name: user_name.trim().to_string(),
        password: password.to_string(),
    };
    let response = api.login(&credentials).await?;
    let role = response.user.role;

    session.login(response.token, role)?;
    info!("User '{}' signed in", credentials.user_name);

    Ok(landing_for(Some(role)))
}

/// Message shown on the sign-in screen for a failed attempt
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::Authentication(_) => "Invalid username or password".to_string(),
        Error::Network(_) => "No response from server. Please try again later.".to_string(),
        Error::Validation { message, .. } => message.clone(),
        Error::Server { status, message } if message.is_empty() => format!("Error: {}", status),
        Error::Server { message, .. } => message.clone(),
        _ => "An error occurred during login".to_string(),
    }
}
