//! Role-based route guard
//!
//! Evaluation is pure: it looks only at the session snapshot and the
//! destination's required roles, and runs afresh on every navigation.

use crate::auth::{Role, Session};
use crate::routes::roles::RoleSet;
use crate::routes::router::Destination;

/// Outcome of checking a session against a destination's requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No session; send to sign-in
    Unauthenticated,
    /// Signed in with a role outside the required set; send to the role's landing page
    Unauthorized,
    /// Render the destination
    Authorized,
}

/// What the navigation layer should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(Destination),
}

/// Classify `session` against `required`
pub fn evaluate(session: &Session, required: RoleSet) -> GuardState {
    if !session.is_authenticated() {
        return GuardState::Unauthenticated;
    }
    match session.role() {
        Some(role) if required.contains(role) => GuardState::Authorized,
        _ => GuardState::Unauthorized,
    }
}

/// Decide whether to render or where to redirect
pub fn decide(session: &Session, required: impl Into<RoleSet>) -> Decision {
    match evaluate(session, required.into()) {
        GuardState::Authorized => Decision::Render,
        GuardState::Unauthenticated => Decision::Redirect(Destination::SignIn),
        GuardState::Unauthorized => Decision::Redirect(landing_for(session.role())),
    }
}

/// Default destination for a role
pub fn landing_for(role: Option<Role>) -> Destination {
    match role {
        Some(Role::Admin) => Destination::Admin,
        _ => Destination::Home,
    }
}
