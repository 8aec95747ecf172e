//! Site configuration read from the environment.

use std::env;

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::auth::client::SocialProvider;

/// Default auth provider base URL.
pub const DEFAULT_AUTH_URL: &str = "http://localhost:3000";

/// Development-only signing secret used when none is configured.
const DEV_AUTH_SECRET: &str = "regsite-default-dev-secret-change-in-production";

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}': {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// OAuth client credentials for a social provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Configuration consumed by the site.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Base URL of the auth provider.
    pub auth_base_url: String,
    /// Shared secret with the auth provider.
    pub auth_secret: String,
    /// PostgreSQL connection URL, if set.
    pub database_url: Option<String>,
    /// GitHub OAuth app, if both halves are set.
    pub github: Option<OAuthCredentials>,
}

impl SiteConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                                  | Default                      |
    /// |-------------------------------------------|------------------------------|
    /// | `BETTER_AUTH_URL`                         | `http://localhost:3000`      |
    /// | `BETTER_AUTH_SECRET`                      | development secret (warns)   |
    /// | `DATABASE_URL`                            | unset                        |
    /// | `GITHUB_CLIENT_ID` + `GITHUB_CLIENT_SECRET` | unset (GitHub sign-in off) |
    ///
    /// Fails only when `BETTER_AUTH_URL` is set but is not an `http` or
    /// `https` URL.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SiteConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let auth_secret = non_empty("BETTER_AUTH_SECRET").unwrap_or_else(|| {
            warn!("BETTER_AUTH_SECRET not set, using development secret");
            DEV_AUTH_SECRET.to_string()
        });

        let github = match (non_empty("GITHUB_CLIENT_ID"), non_empty("GITHUB_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(OAuthCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        let auth_base_url = match non_empty("BETTER_AUTH_URL") {
            Some(value) => checked_http_url("BETTER_AUTH_URL", value)?,
            None => DEFAULT_AUTH_URL.to_string(),
        };

        Ok(Self {
            auth_base_url,
            auth_secret,
            database_url: non_empty("DATABASE_URL"),
            github,
        })
    }

    /// Social providers that have credentials configured.
    pub fn social_providers(&self) -> Vec<SocialProvider> {
        let mut providers = Vec::new();
        if self.github.is_some() {
            providers.push(SocialProvider::Github);
        }
        providers
    }

    pub fn is_enabled(&self, provider: SocialProvider) -> bool {
        self.social_providers().contains(&provider)
    }
}

fn checked_http_url(var: &'static str, value: String) -> Result<String> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        var,
        value: value.clone(),
        reason,
    };
    let url = Url::parse(&value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(value),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
