//! Sign-up form and registration

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiClient;
use crate::auth::models::{RegisterRequest, Role};
use crate::error::{Error, Result};
use crate::routes::Destination;

/// Registration form as entered by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Check the form locally. Nothing is sent when this fails.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("first_name", &self.first_name, "First name is required"),
            ("last_name", &self.last_name, "Last name is required"),
            ("user_name", &self.user_name, "Username is required"),
            ("email", &self.email, "Email is required"),
            ("password", &self.password, "Password is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                return Err(Error::validation(field, message));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(Error::validation("email", "Enter a valid email address"));
        }
        if self.password != self.confirm_password {
            return Err(Error::validation("confirm_password", "Passwords do not match"));
        }
        Ok(())
    }

    /// Registration payload. Self-registration always creates customers.
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            user_name: self.user_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: Role::Customer,
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').filter(|part| !part.is_empty()).count() >= 2
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Register a customer account and return where to go next
pub async fn sign_up(api: &ApiClient, form: &SignUpForm) -> Result<Destination> {
    form.validate()?;
    api.register(&form.to_request()).await?;
    info!("Registered user '{}'", form.user_name.trim());
    Ok(Destination::SignIn)
}

/// Message shown on the sign-up screen for a failed attempt
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::Validation { message, .. } => message.clone(),
        other => other
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| "Registration failed. Please try again.".to_string()),
    }
}
