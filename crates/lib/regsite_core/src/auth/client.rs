//! Auth provider client.
//!
//! [`AuthClient`] is the seam the sign-in flow depends on. [`HttpAuthClient`]
//! talks to the provider's REST endpoints under `/api/auth`.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AuthClientError;
use super::response::{AuthResponse, ErrorDetail};
use crate::models::auth::{SignInData, SocialRedirect};

/// Social sign-in providers the site can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Github,
}

impl SocialProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialProvider::Github => "github",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email + password sign-in request.
#[derive(Debug, Clone, Serialize)]
pub struct EmailCredentials {
    pub email: String,
    pub password: String,
}

/// Social sign-in request.
#[derive(Debug, Clone, Serialize)]
pub struct SocialSignIn {
    pub provider: SocialProvider,
    #[serde(rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Email sign-up request.
#[derive(Debug, Clone, Serialize)]
pub struct EmailSignUp {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Operations consumed from the auth provider.
///
/// `Ok` carries whatever the provider answered, including provider-side
/// errors. `Err` means the call itself failed (network, unreadable body).
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_in_email(
        &self,
        credentials: &EmailCredentials,
    ) -> Result<AuthResponse<SignInData>, AuthClientError>;

    async fn sign_in_social(
        &self,
        request: &SocialSignIn,
    ) -> Result<AuthResponse<SocialRedirect>, AuthClientError>;

    async fn sign_up_email(
        &self,
        request: &EmailSignUp,
    ) -> Result<AuthResponse<SignInData>, AuthClientError>;
}

/// REST client for the provider's `/api/auth` endpoints.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
    /// Create a client for the provider at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/auth/{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<AuthResponse<T>, AuthClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.endpoint(path);
        debug!(%url, "calling auth provider");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthClientError::Transport(format!("{path}: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AuthClientError::Transport(format!("{path}: reading body: {e}")))?;

        if status.is_success() {
            let data = serde_json::from_str(&text)
                .map_err(|e| AuthClientError::Decode(format!("{path}: {e}")))?;
            return Ok(AuthResponse::success(data));
        }

        Ok(AuthResponse::failure(error_from_body(
            status.as_u16(),
            status.canonical_reason(),
            &text,
        )))
    }
}

/// Build an [`ErrorDetail`] from a non-2xx body.
///
/// Bodies that are not the provider's JSON error shape keep no message,
/// so the classifier falls through to its generic text.
fn error_from_body(status: u16, reason: Option<&str>, body: &str) -> ErrorDetail {
    let detail: ErrorDetail = serde_json::from_str(body).unwrap_or_default();
    detail.with_status(status, reason.map(str::to_string))
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn sign_in_email(
        &self,
        credentials: &EmailCredentials,
    ) -> Result<AuthResponse<SignInData>, AuthClientError> {
        self.post("sign-in/email", credentials).await
    }

    async fn sign_in_social(
        &self,
        request: &SocialSignIn,
    ) -> Result<AuthResponse<SocialRedirect>, AuthClientError> {
        self.post("sign-in/social", request).await
    }

    async fn sign_up_email(
        &self,
        request: &EmailSignUp,
    ) -> Result<AuthResponse<SignInData>, AuthClientError> {
        self.post("sign-up/email", request).await
    }
}
