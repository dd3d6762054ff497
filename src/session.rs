//! Session state machine and route guard

use serde::{Deserialize, Serialize};

/// Authenticated principal as reported by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Session lifecycle.
///
/// Starts `Unresolved` until the provider resolution at startup completes,
/// then settles into exactly one of `SignedIn`/`SignedOut`. Logout and
/// observed token expiry move any state to `SignedOut`.
#[derive(Debug, Clone)]
pub enum SessionState {
    Unresolved,
    SignedIn(UserIdentity),
    SignedOut,
}

impl SessionState {
    pub fn principal(&self) -> Option<&UserIdentity> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }
}

/// Guard verdict for a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteAccess {
    /// Session not yet resolved: render a loading placeholder, no redirect
    Pending,
    Allow,
    Redirect { to: String },
}

pub const LOGIN_ROUTE: &str = "/login";

/// Routes reachable without a session
const PUBLIC_ROUTES: &[&str] = &["/login", "/signup", "/forgot-password", "/reset-password"];

/// Gate a route on the presence of an authenticated principal.
///
/// Pure over `(session, route)`: an unresolved session never navigates,
/// and a resolved-absent one redirects to the login route.
pub fn guard(session: &SessionState, route: &str) -> RouteAccess {
    if PUBLIC_ROUTES.contains(&route) {
        return RouteAccess::Allow;
    }

    match session {
        SessionState::Unresolved => RouteAccess::Pending,
        SessionState::SignedIn(_) => RouteAccess::Allow,
        SessionState::SignedOut => RouteAccess::Redirect {
            to: LOGIN_ROUTE.to_string(),
        },
    }
}
