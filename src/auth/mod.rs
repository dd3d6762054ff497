//! Auth provider adapters module
//!
//! Credential issuance, password resets and profile updates are owned by
//! an external identity provider; this module only adapts its REST surface.

pub mod identity_toolkit;

use crate::error::Result;
use crate::session::UserIdentity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Resolved provider session for one principal
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserIdentity,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Operations every auth provider implementation must support
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a new account from email and password
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Sign in with a Google ID token obtained by the frontend popup flow
    async fn sign_in_with_google(&self, google_id_token: &str) -> Result<AuthSession>;

    /// Email a password reset link
    async fn send_password_reset(&self, email: &str) -> Result<()>;

    /// Complete a password reset using the emailed out-of-band code
    async fn confirm_password_reset(&self, oob_code: &str, new_password: &str) -> Result<()>;

    /// Update display name and/or photo URL of the signed-in principal
    async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<UserIdentity>;

    /// Change the signed-in principal's password
    async fn update_password(&self, id_token: &str, new_password: &str) -> Result<AuthSession>;
}

#[cfg(test)]
pub mod stub {
    //! In-memory provider for state and command-layer tests

    use super::*;
    use crate::error::AppError;
    use parking_lot::Mutex;

    /// Provider that accepts a single fixed credential pair
    pub struct StubProvider {
        pub email: String,
        pub password: String,
        pub reset_requests: Mutex<Vec<String>>,
    }

    impl StubProvider {
        pub fn new(email: &str, password: &str) -> Self {
            Self {
                email: email.to_string(),
                password: password.to_string(),
                reset_requests: Mutex::new(Vec::new()),
            }
        }

        fn session(&self, email: &str) -> AuthSession {
            AuthSession {
                user: UserIdentity {
                    id: "stub-uid".to_string(),
                    email: email.to_string(),
                    display_name: None,
                    photo_url: None,
                },
                id_token: "stub-token".to_string(),
                refresh_token: None,
                expires_at: Utc::now() + chrono::Duration::hours(1),
            }
        }
    }

    #[async_trait]
    impl AuthProvider for StubProvider {
        async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthSession> {
            if email == self.email {
                return Err(AppError::Auth("email already in use".to_string()));
            }
            Ok(self.session(email))
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
            if email == self.email && password == self.password {
                Ok(self.session(email))
            } else {
                Err(AppError::Auth("invalid credentials".to_string()))
            }
        }

        async fn sign_in_with_google(&self, _google_id_token: &str) -> Result<AuthSession> {
            Ok(self.session(&self.email))
        }

        async fn send_password_reset(&self, email: &str) -> Result<()> {
            self.reset_requests.lock().push(email.to_string());
            Ok(())
        }

        async fn confirm_password_reset(&self, _oob_code: &str, _new_password: &str) -> Result<()> {
            Ok(())
        }

        async fn update_profile(
            &self,
            _id_token: &str,
            display_name: Option<&str>,
            photo_url: Option<&str>,
        ) -> Result<UserIdentity> {
            Ok(UserIdentity {
                id: "stub-uid".to_string(),
                email: self.email.clone(),
                display_name: display_name.map(str::to_string),
                photo_url: photo_url.map(str::to_string),
            })
        }

        async fn update_password(&self, _id_token: &str, _new_password: &str) -> Result<AuthSession> {
            Ok(self.session(&self.email))
        }
    }
}
