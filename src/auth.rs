//! Credentials: API key validation and the shared token state.
//!
//! The client holds one long-lived API key (`sk_live_*` / `sk_test_*`) and,
//! after the bootstrap exchange, one short-lived bearer access token. The
//! token-issuance request always authenticates with the key; every other
//! request prefers the token and falls back to the key only while no token
//! has been obtained.

use std::sync::{LazyLock, PoisonError, RwLock};

use regex::Regex;

use crate::config::Environment;
use crate::error::AuthenticationError;

static KEY_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^sk_(live|test)_[a-zA-Z0-9]+$").expect("key format pattern is valid")
});

/// A validated secret API key.
///
/// Keys are trimmed and checked against the `sk_(live|test)_…` format
/// before any network call; publishable (`pk_*`) keys are rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Parses and validates an API key.
    ///
    /// # Errors
    ///
    /// - [`AuthenticationError::MissingKey`] for an empty key
    /// - [`AuthenticationError::InvalidKeyFormat`] for anything not
    ///   matching `sk_(live|test)_[a-zA-Z0-9]+`
    pub fn parse(raw: &str) -> Result<Self, AuthenticationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthenticationError::MissingKey);
        }
        if !KEY_FORMAT.is_match(trimmed) {
            return Err(AuthenticationError::InvalidKeyFormat);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The raw key value, for the Authorization header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The environment this key routes to.
    ///
    /// Selection is a substring match: a key containing `test` anywhere
    /// routes to the sandbox. A live key that happens to contain "test"
    /// in its random portion would therefore be mis-routed; this mirrors
    /// the API's documented behavior and is deliberately not "fixed" here.
    #[must_use]
    pub fn environment(&self) -> Environment {
        if self.0.contains("test") {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }
}

impl std::str::FromStr for ApiKey {
    type Err = AuthenticationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets stay out of logs; the prefix is enough to identify the key.
        let prefix: String = self.0.chars().take(8).collect();
        write!(f, "ApiKey({prefix}***)")
    }
}

/// A short-lived bearer access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value received from the issuance endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, for the Authorization header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(***)")
    }
}

/// Which credential a request must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The token-issuance call itself; always authenticates with the key.
    TokenIssuance,
    /// Any other call; prefers the access token.
    Regular,
}

/// A consistent snapshot of the active credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The validated API key.
    pub api_key: ApiKey,
    /// The active access token, once obtained.
    pub access_token: Option<AccessToken>,
}

impl Credentials {
    /// Selects the bearer value for the given request kind.
    #[must_use]
    pub fn bearer_for(&self, kind: RequestKind) -> &str {
        match kind {
            RequestKind::TokenIssuance => self.api_key.as_str(),
            RequestKind::Regular => self
                .access_token
                .as_ref()
                .map_or_else(|| self.api_key.as_str(), AccessToken::as_str),
        }
    }
}

/// Shared credential state.
///
/// Requests take a cheap read-locked snapshot; key rotation serializes on
/// a separate async mutex so a rotation fully completes (new token fetched
/// or error surfaced) before any caller proceeds with the new key.
pub(crate) struct AuthState {
    credentials: RwLock<Credentials>,
    rotation: tokio::sync::Mutex<()>,
}

impl AuthState {
    pub(crate) fn new(api_key: ApiKey) -> Self {
        Self {
            credentials: RwLock::new(Credentials {
                api_key,
                access_token: None,
            }),
            rotation: tokio::sync::Mutex::new(()),
        }
    }

    /// A consistent snapshot of the current credentials.
    pub(crate) fn snapshot(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs the access token obtained for the current key.
    pub(crate) fn install_token(&self, token: AccessToken) {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token = Some(token);
    }

    /// Atomically replaces the key and token after a rotation.
    pub(crate) fn replace(&self, api_key: ApiKey, access_token: Option<AccessToken>) {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *credentials = Credentials {
            api_key,
            access_token,
        };
    }

    /// Serializes key rotations; hold the guard across the token fetch.
    pub(crate) async fn rotation_guard(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.rotation.lock().await
    }

    /// The environment of the current key.
    pub(crate) fn environment(&self) -> Environment {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .api_key
            .environment()
    }
}
