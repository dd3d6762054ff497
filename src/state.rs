//! Application state management

use crate::api::MarketApi;
use crate::auth::identity_toolkit::IdentityToolkitProvider;
use crate::auth::{AuthProvider, AuthSession};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::requests::RequestTracker;
use crate::session::{SessionState, UserIdentity};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// Application state shared across all commands
pub struct AppState {
    /// Aggregation API client
    pub api: MarketApi,

    /// External auth provider
    pub auth: Arc<dyn AuthProvider>,

    /// Session state machine exposed to the route guard
    session: RwLock<SessionState>,

    /// Provider tokens backing the current session
    provider_session: RwLock<Option<AuthSession>>,

    /// Per-view request sequencing
    pub requests: RequestTracker,

    /// Resolved runtime configuration
    pub config: AppConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = MarketApi::new(&config)?;
        let auth = Arc::new(IdentityToolkitProvider::new(&config)?);

        Ok(Self {
            api,
            auth,
            session: RwLock::new(SessionState::Unresolved),
            provider_session: RwLock::new(None),
            requests: RequestTracker::new(),
            config,
        })
    }

    #[cfg(test)]
    pub fn with_provider(auth: Arc<dyn AuthProvider>) -> Self {
        let config = AppConfig {
            api_base_url: "https://api.invalid/dev".to_string(),
            auth_base_url: "https://auth.invalid/v1".to_string(),
            auth_api_key: String::new(),
            http_timeout_secs: 1,
        };

        Self {
            api: MarketApi::new(&config).expect("test API client"),
            auth,
            session: RwLock::new(SessionState::Unresolved),
            provider_session: RwLock::new(None),
            requests: RequestTracker::new(),
            config,
        }
    }

    /// Resolve the startup session exactly once.
    ///
    /// The provider holds no session for us at startup (sessions live in
    /// memory only), so resolution always lands on SignedOut; later state
    /// changes go through [`establish_session`](Self::establish_session)
    /// and [`clear_session`](Self::clear_session).
    pub fn resolve_session(&self) {
        let mut session = self.session.write();
        if !session.is_resolved() {
            *session = SessionState::SignedOut;
            tracing::info!("Session resolved: signed out");
        }
    }

    /// Install a freshly authenticated provider session
    pub fn establish_session(&self, auth_session: AuthSession) {
        *self.session.write() = SessionState::SignedIn(auth_session.user.clone());
        *self.provider_session.write() = Some(auth_session);
    }

    /// Drop the session (logout or observed expiry)
    pub fn clear_session(&self) {
        *self.session.write() = SessionState::SignedOut;
        *self.provider_session.write() = None;
    }

    /// Replace the principal after a profile update
    pub fn update_identity(&self, user: UserIdentity) {
        let mut session = self.session.write();
        if matches!(*session, SessionState::SignedIn(_)) {
            *session = SessionState::SignedIn(user);
        }
    }

    /// Current session state for the guard
    pub fn session_snapshot(&self) -> SessionState {
        self.session.read().clone()
    }

    /// Check if a principal is signed in
    pub fn is_authenticated(&self) -> bool {
        self.session.read().principal().is_some()
    }

    /// Principal of the signed-in session, or an auth error
    pub fn require_session(&self) -> Result<UserIdentity> {
        self.session
            .read()
            .principal()
            .cloned()
            .ok_or_else(|| AppError::Auth("sign in required".to_string()))
    }

    /// ID token for provider calls; observed expiry signs the session out
    pub fn require_token(&self) -> Result<String> {
        let expired = {
            let guard = self.provider_session.read();
            match guard.as_ref() {
                Some(session) if !session.is_expired(Utc::now()) => {
                    return Ok(session.id_token.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            tracing::info!("Provider token expired, signing out");
            self.clear_session();
            return Err(AppError::Auth("session expired, sign in again".to_string()));
        }

        Err(AppError::Auth("sign in required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::stub::StubProvider;
    use crate::session::RouteAccess;
    use chrono::Duration;

    fn state() -> AppState {
        AppState::with_provider(Arc::new(StubProvider::new("a@example.com", "hunter2!")))
    }

    fn session(expires_in: Duration) -> AuthSession {
        AuthSession {
            user: UserIdentity {
                id: "u1".to_string(),
                email: "a@example.com".to_string(),
                display_name: None,
                photo_url: None,
            },
            id_token: "token".to_string(),
            refresh_token: None,
            expires_at: Utc::now() + expires_in,
        }
    }

    #[test]
    fn test_resolution_happens_once() {
        let state = state();
        assert!(!state.session_snapshot().is_resolved());

        state.resolve_session();
        assert!(!state.is_authenticated());

        // an established session survives a second (spurious) resolution
        state.establish_session(session(Duration::hours(1)));
        state.resolve_session();
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_guard_follows_state_transitions() {
        let state = state();
        assert_eq!(
            crate::session::guard(&state.session_snapshot(), "/"),
            RouteAccess::Pending
        );

        state.resolve_session();
        assert_eq!(
            crate::session::guard(&state.session_snapshot(), "/"),
            RouteAccess::Redirect {
                to: "/login".to_string()
            }
        );

        state.establish_session(session(Duration::hours(1)));
        assert_eq!(
            crate::session::guard(&state.session_snapshot(), "/"),
            RouteAccess::Allow
        );

        state.clear_session();
        assert_eq!(
            crate::session::guard(&state.session_snapshot(), "/"),
            RouteAccess::Redirect {
                to: "/login".to_string()
            }
        );
    }

    #[test]
    fn test_require_token_signs_out_on_expiry() {
        let state = state();
        state.establish_session(session(Duration::seconds(-10)));

        let result = state.require_token();
        assert!(matches!(result, Err(AppError::Auth(_))));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_require_token_returns_live_token() {
        let state = state();
        state.establish_session(session(Duration::hours(1)));

        assert_eq!(state.require_token().unwrap(), "token");
    }

    #[test]
    fn test_require_session_rejects_signed_out() {
        let state = state();
        state.resolve_session();
        assert!(state.require_session().is_err());
    }
}
