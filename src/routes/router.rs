//! Route table and path resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::auth::{Role, Session};
use crate::routes::guard::{self, Decision};
use crate::routes::roles::RoleSet;

/// Every place the client can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    SignIn,
    SignUp,
    Home,
    Admin,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::SignIn => "/signin",
            Destination::SignUp => "/signup",
            Destination::Home => "/home",
            Destination::Admin => "/admin",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Who may render a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Guarded(RoleSet),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub destination: Destination,
    pub access: RouteAccess,
}

impl Route {
    pub fn public(destination: Destination) -> Self {
        Self {
            destination,
            access: RouteAccess::Public,
        }
    }

    pub fn guarded(destination: Destination, roles: impl Into<RoleSet>) -> Self {
        Self {
            destination,
            access: RouteAccess::Guarded(roles.into()),
        }
    }
}

/// Why a navigation did not render what was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// No route for the path
    Unmatched,
    /// Signed out
    Unauthenticated,
    /// Signed in without a permitted role
    Unauthorized,
}

/// Result of resolving one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Destination),
    Redirect { to: Destination, reason: RedirectReason },
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Destination,
}

impl Router {
    pub fn new(routes: Vec<Route>, fallback: Destination) -> Self {
        Self { routes, fallback }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route for a path. Trailing slashes and query strings are ignored.
    pub fn route_for(&self, path: &str) -> Option<&Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.routes.iter().find(|route| route.destination.path() == path)
    }

    pub fn route_to(&self, destination: Destination) -> Option<&Route> {
        self.routes.iter().find(|route| route.destination == destination)
    }

    /// Resolve a path for the given session
    pub fn resolve(&self, path: &str, session: &Session) -> Resolution {
        let Some(route) = self.route_for(path) else {
            debug!("No route for {}, redirecting to {}", path, self.fallback);
            return Resolution::Redirect {
                to: self.fallback,
                reason: RedirectReason::Unmatched,
            };
        };

        self.check(route, session)
    }

    fn check(&self, route: &Route, session: &Session) -> Resolution {
        let RouteAccess::Guarded(required) = route.access else {
            return Resolution::Render(route.destination);
        };

        match guard::decide(session, required) {
            Decision::Render => Resolution::Render(route.destination),
            Decision::Redirect(to) => {
                let reason = if session.is_authenticated() {
                    RedirectReason::Unauthorized
                } else {
                    RedirectReason::Unauthenticated
                };
                debug!("Guard redirected {} to {} ({:?})", route.destination, to, reason);
                Resolution::Redirect { to, reason }
            }
        }
    }
}

impl Default for Router {
    /// `/signin` and `/signup` are public, `/home` admits admins and customers,
    /// `/admin` admits admins; anything else goes to `/signin`.
    fn default() -> Self {
        Self::new(
            vec![
                Route::public(Destination::SignIn),
                Route::public(Destination::SignUp),
                Route::guarded(Destination::Home, [Role::Admin, Role::Customer]),
                Route::guarded(Destination::Admin, Role::Admin),
            ],
            Destination::SignIn,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_lookup_normalises_path() {
        let router = Router::default();
        assert_eq!(router.route_for("/home/").unwrap().destination, Destination::Home);
        assert_eq!(router.route_for("/admin?tab=new").unwrap().destination, Destination::Admin);
        assert!(router.route_for("/").is_none());
        assert!(router.route_for("/homepage").is_none());
    }

    #[test]
    fn test_unmatched_and_root_go_to_signin() {
        let router = Router::default();
        let session = Session::authenticated("t", Role::Admin);
        for path in ["/", "", "/nowhere", "/admin/extra"] {
            assert_eq!(
                router.resolve(path, &session),
                Resolution::Redirect {
                    to: Destination::SignIn,
                    reason: RedirectReason::Unmatched
                }
            );
        }
    }

    #[test]
    fn test_public_routes_render_for_anyone() {
        let router = Router::default();
        let anon = Session::anonymous();
        assert_eq!(router.resolve("/signin", &anon), Resolution::Render(Destination::SignIn));
        assert_eq!(router.resolve("/signup", &anon), Resolution::Render(Destination::SignUp));
    }

    #[test]
    fn test_guarded_routes() {
        let router = Router::default();
        let customer = Session::authenticated("t", Role::Customer);
        let admin = Session::authenticated("t", Role::Admin);

        assert_eq!(router.resolve("/home", &customer), Resolution::Render(Destination::Home));
        assert_eq!(router.resolve("/home", &admin), Resolution::Render(Destination::Home));
        assert_eq!(router.resolve("/admin", &admin), Resolution::Render(Destination::Admin));
        assert_eq!(
            router.resolve("/admin", &customer),
            Resolution::Redirect {
                to: Destination::Home,
                reason: RedirectReason::Unauthorized
            }
        );
        assert_eq!(
            router.resolve("/home", &Session::anonymous()),
            Resolution::Redirect {
                to: Destination::SignIn,
                reason: RedirectReason::Unauthenticated
            }
        );
    }
}
