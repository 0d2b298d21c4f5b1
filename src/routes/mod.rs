//! Role-gated navigation

pub mod guard;
pub mod navigator;
pub mod roles;
pub mod router;

pub use guard::{decide, evaluate, landing_for, Decision, GuardState};
pub use navigator::{Navigation, Navigator, Redirect};
pub use roles::RoleSet;
pub use router::{Destination, RedirectReason, Resolution, Route, RouteAccess, Router};
