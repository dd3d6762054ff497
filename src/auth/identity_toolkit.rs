//! Google Identity Toolkit provider adapter

#![allow(non_snake_case)]

use crate::auth::{AuthProvider, AuthSession};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::session::UserIdentity;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Identity Toolkit REST implementation of [`AuthProvider`]
pub struct IdentityToolkitProvider {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl IdentityToolkitProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let base_url = Url::parse(&config.auth_base_url)
            .map_err(|e| AppError::Config(format!("Invalid auth base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.auth_api_key.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config("Auth base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&format!("accounts:{}", action));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, action: &str, body: &B) -> Result<T> {
        let url = self.endpoint(action)?;
        tracing::debug!("POST accounts:{}", action);

        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            #[derive(Deserialize)]
            struct ErrorEnvelope {
                error: ErrorBody,
            }

            #[derive(Deserialize)]
            struct ErrorBody {
                message: String,
            }

            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| friendly_auth_error(&e.error.message))
                .unwrap_or_else(|_| format!("provider rejected the request ({})", status));

            return Err(AppError::Auth(message));
        }

        serde_json::from_str(&text).map_err(|e| {
            AppError::MalformedResponse(format!("accounts:{} response: {}", action, e))
        })
    }
}

/// Common token-bearing response of signUp/signInWithPassword/signInWithIdp/update
#[derive(Debug, Deserialize)]
struct TokenResponse {
    localId: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    displayName: Option<String>,
    #[serde(default)]
    photoUrl: Option<String>,
    idToken: String,
    #[serde(default)]
    refreshToken: Option<String>,
    #[serde(default)]
    expiresIn: Option<String>,
}

impl TokenResponse {
    fn into_session(self, fallback_email: &str) -> AuthSession {
        let ttl_secs: i64 = self
            .expiresIn
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        AuthSession {
            user: UserIdentity {
                id: self.localId,
                email: self.email.unwrap_or_else(|| fallback_email.to_string()),
                display_name: self.displayName,
                photo_url: self.photoUrl,
            },
            id_token: self.idToken,
            refresh_token: self.refreshToken,
            expires_at: Utc::now() + ChronoDuration::seconds(ttl_secs),
        }
    }
}

/// Map provider error codes onto the inline-form messages the views show
fn friendly_auth_error(code: &str) -> String {
    // WEAK_PASSWORD arrives as "WEAK_PASSWORD : Password should be ..."
    let bare = code.split(':').next().unwrap_or(code).trim();
    match bare {
        "EMAIL_EXISTS" => "email already in use".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "invalid credentials".to_string()
        }
        "USER_DISABLED" => "account disabled".to_string(),
        "WEAK_PASSWORD" => "password is too weak".to_string(),
        "INVALID_OOB_CODE" | "EXPIRED_OOB_CODE" => "reset link is invalid or expired".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too many attempts, try again later".to_string(),
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
            "session expired, sign in again".to_string()
        }
        other => other.to_string(),
    }
}

#[async_trait]
impl AuthProvider for IdentityToolkitProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct Request<'a> {
            email: &'a str,
            password: &'a str,
            returnSecureToken: bool,
        }

        let response: TokenResponse = self
            .post(
                "signUp",
                &Request {
                    email,
                    password,
                    returnSecureToken: true,
                },
            )
            .await?;

        Ok(response.into_session(email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct Request<'a> {
            email: &'a str,
            password: &'a str,
            returnSecureToken: bool,
        }

        let response: TokenResponse = self
            .post(
                "signInWithPassword",
                &Request {
                    email,
                    password,
                    returnSecureToken: true,
                },
            )
            .await?;

        Ok(response.into_session(email))
    }

    async fn sign_in_with_google(&self, google_id_token: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct Request {
            postBody: String,
            requestUri: String,
            returnSecureToken: bool,
            returnIdpCredential: bool,
        }

        let response: TokenResponse = self
            .post(
                "signInWithIdp",
                &Request {
                    postBody: format!("id_token={}&providerId=google.com", google_id_token),
                    requestUri: "http://localhost".to_string(),
                    returnSecureToken: true,
                    returnIdpCredential: true,
                },
            )
            .await?;

        Ok(response.into_session(""))
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            requestType: &'static str,
            email: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            #[allow(dead_code)]
            email: Option<String>,
        }

        let _: Response = self
            .post(
                "sendOobCode",
                &Request {
                    requestType: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;

        Ok(())
    }

    async fn confirm_password_reset(&self, oob_code: &str, new_password: &str) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            oobCode: &'a str,
            newPassword: &'a str,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            #[allow(dead_code)]
            email: Option<String>,
        }

        let _: Response = self
            .post(
                "resetPassword",
                &Request {
                    oobCode: oob_code,
                    newPassword: new_password,
                },
            )
            .await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        id_token: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<UserIdentity> {
        #[derive(Serialize)]
        struct Request<'a> {
            idToken: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            displayName: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            photoUrl: Option<&'a str>,
            returnSecureToken: bool,
        }

        // Without returnSecureToken the update response carries no tokens
        #[derive(Deserialize)]
        struct ProfileResponse {
            localId: String,
            #[serde(default)]
            email: Option<String>,
            #[serde(default)]
            displayName: Option<String>,
            #[serde(default)]
            photoUrl: Option<String>,
        }

        let response: ProfileResponse = self
            .post(
                "update",
                &Request {
                    idToken: id_token,
                    displayName: display_name,
                    photoUrl: photo_url,
                    returnSecureToken: false,
                },
            )
            .await?;

        Ok(UserIdentity {
            id: response.localId,
            email: response.email.unwrap_or_default(),
            display_name: response.displayName,
            photo_url: response.photoUrl,
        })
    }

    async fn update_password(&self, id_token: &str, new_password: &str) -> Result<AuthSession> {
        #[derive(Serialize)]
        struct Request<'a> {
            idToken: &'a str,
            password: &'a str,
            returnSecureToken: bool,
        }

        let response: TokenResponse = self
            .post(
                "update",
                &Request {
                    idToken: id_token,
                    password: new_password,
                    returnSecureToken: true,
                },
            )
            .await?;

        Ok(response.into_session(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_error_mapping() {
        assert_eq!(friendly_auth_error("EMAIL_EXISTS"), "email already in use");
        assert_eq!(friendly_auth_error("EMAIL_NOT_FOUND"), "invalid credentials");
        assert_eq!(
            friendly_auth_error("INVALID_LOGIN_CREDENTIALS"),
            "invalid credentials"
        );
        assert_eq!(
            friendly_auth_error("WEAK_PASSWORD : Password should be at least 6 characters"),
            "password is too weak"
        );
        assert_eq!(friendly_auth_error("SOMETHING_NEW"), "SOMETHING_NEW");
    }

    #[test]
    fn test_token_response_into_session() {
        let response: TokenResponse = serde_json::from_str(
            r#"{
                "localId": "uid-9",
                "email": "a@example.com",
                "displayName": "Ana",
                "idToken": "tok",
                "refreshToken": "refresh",
                "expiresIn": "3600"
            }"#,
        )
        .unwrap();

        let session = response.into_session("fallback@example.com");
        assert_eq!(session.user.id, "uid-9");
        assert_eq!(session.user.email, "a@example.com");
        assert_eq!(session.user.display_name.as_deref(), Some("Ana"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh"));
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_token_response_fallback_email() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"localId": "u", "idToken": "t"}"#).unwrap();
        let session = response.into_session("fallback@example.com");
        assert_eq!(session.user.email, "fallback@example.com");
    }
}
