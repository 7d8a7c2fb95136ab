//! Client configuration.
//!
//! This module provides:
//! - Tunable client settings ([`ClientConfig`]) with builder-style setters
//! - API environment selection ([`Environment`]) and base URL resolution
//! - Default values ([`defaults`])
//!
//! The environment is never stored: it is derived from the API key every
//! time a request is dispatched, so rotating to a key for the other
//! environment transparently re-routes subsequent calls.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL of the live API, without version segment.
pub const API_LIVE_BASE: &str = "https://api.tahsilat.com";

/// Base URL of the sandbox API, without version segment.
pub const API_SANDBOX_BASE: &str = "https://api.sandbox.tahsilat.com";

/// Default configuration values.
pub mod defaults {
    use std::time::Duration;

    /// Default API version segment.
    pub const API_VERSION: &str = "v1";

    /// Default number of retries for transient network failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Default connect timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default total request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(80);
}

/// API environment, selected by the API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment (`sk_live_*` keys).
    Live,
    /// Sandbox environment (`sk_test_*` keys).
    Sandbox,
}

impl Environment {
    /// Returns true for the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Returns true for the live environment.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Client configuration options.
///
/// All settings have sensible defaults; override them with the `with_*`
/// setters before handing the config to
/// [`TahsilatClient::new`](crate::TahsilatClient::new).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tahsilat::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(Duration::from_secs(120))
///     .with_max_retries(5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API version segment appended to the base URL.
    pub api_version: String,

    /// Maximum number of retries for transient network failures.
    ///
    /// A value of 0 disables retries; only the initial attempt is made.
    pub max_retries: u32,

    /// Connect timeout. Mandatory and finite.
    pub connect_timeout: Duration,

    /// Total request timeout. Mandatory and finite.
    pub timeout: Duration,

    /// Whether to verify TLS certificates.
    ///
    /// Disable only against non-production endpoints.
    pub verify_ssl_certs: bool,

    /// Optional custom trust-anchor bundle (PEM file).
    pub ca_bundle_path: Option<PathBuf>,

    /// Skip the access-token bootstrap at construction.
    ///
    /// When set, requests authenticate with the API key until a token is
    /// fetched explicitly.
    pub skip_token_fetch: bool,

    /// Override for the API base URL.
    ///
    /// When set, environment selection and `api_version` are ignored.
    /// Intended for tests and self-hosted gateways.
    pub api_base: Option<Url>,
}

impl ClientConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_version: defaults::API_VERSION.to_owned(),
            max_retries: defaults::MAX_RETRIES,
            connect_timeout: defaults::CONNECT_TIMEOUT,
            timeout: defaults::TIMEOUT,
            verify_ssl_certs: true,
            ca_bundle_path: None,
            skip_token_fetch: false,
            api_base: None,
        }
    }

    /// Sets the API version segment.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the maximum number of retries for transient network failures.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the total request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn with_verify_ssl_certs(mut self, verify: bool) -> Self {
        self.verify_ssl_certs = verify;
        self
    }

    /// Sets a custom trust-anchor bundle path.
    #[must_use]
    pub fn with_ca_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle_path = Some(path.into());
        self
    }

    /// Skips the access-token bootstrap at construction.
    #[must_use]
    pub const fn with_skip_token_fetch(mut self, skip: bool) -> Self {
        self.skip_token_fetch = skip;
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, base: Url) -> Self {
        self.api_base = Some(base);
        self
    }

    /// Resolves the base URL for the given environment.
    ///
    /// The returned URL always ends with a trailing slash so relative
    /// paths join below it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the configured
    /// `api_version` does not form a valid URL.
    pub fn base_url(&self, environment: Environment) -> Result<Url, ConfigError> {
        let mut url = match &self.api_base {
            Some(base) => base.clone(),
            None => {
                let host = match environment {
                    Environment::Live => API_LIVE_BASE,
                    Environment::Sandbox => API_SANDBOX_BASE,
                };
                let raw = format!("{host}/{}/", self.api_version);
                Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
                    url: raw,
                    reason: e.to_string(),
                })?
            }
        };

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for configuration and HTTP client construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the custom CA bundle.
    #[error("failed to read CA bundle '{}': {source}", path.display())]
    CaBundleRead {
        /// Path to the bundle file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The custom CA bundle is not valid PEM.
    #[error("invalid CA bundle '{}': {reason}", path.display())]
    CaBundleInvalid {
        /// Path to the bundle file
        path: PathBuf,
        /// Reason for invalidity
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),

    /// The configured base URL is invalid.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ClientConfig::new();

        assert_eq!(config.api_version, "v1");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.timeout, Duration::from_secs(80));
        assert!(config.verify_ssl_certs);
        assert!(config.ca_bundle_path.is_none());
        assert!(!config.skip_token_fetch);
        assert!(config.api_base.is_none());
    }

    #[test]
    fn builder_chains_correctly() {
        let config = ClientConfig::new()
            .with_api_version("v2")
            .with_max_retries(5)
            .with_connect_timeout(Duration::from_secs(10))
            .with_timeout(Duration::from_secs(120))
            .with_verify_ssl_certs(false)
            .with_ca_bundle_path("/etc/ssl/custom.pem")
            .with_skip_token_fetch(true);

        assert_eq!(config.api_version, "v2");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(!config.verify_ssl_certs);
        assert_eq!(
            config.ca_bundle_path.as_deref(),
            Some(std::path::Path::new("/etc/ssl/custom.pem"))
        );
        assert!(config.skip_token_fetch);
    }

    #[test]
    fn base_url_selects_environment() {
        let config = ClientConfig::new();

        assert_eq!(
            config.base_url(Environment::Live).unwrap().as_str(),
            "https://api.tahsilat.com/v1/"
        );
        assert_eq!(
            config.base_url(Environment::Sandbox).unwrap().as_str(),
            "https://api.sandbox.tahsilat.com/v1/"
        );
    }

    #[test]
    fn base_url_honours_api_version() {
        let config = ClientConfig::new().with_api_version("v2");

        assert_eq!(
            config.base_url(Environment::Live).unwrap().as_str(),
            "https://api.tahsilat.com/v2/"
        );
    }

    #[test]
    fn base_url_override_wins_and_gains_trailing_slash() {
        let base = Url::parse("http://127.0.0.1:9000/v1").unwrap();
        let config = ClientConfig::new().with_api_base(base);

        let resolved = config.base_url(Environment::Live).unwrap();
        assert_eq!(resolved.as_str(), "http://127.0.0.1:9000/v1/");

        // Environment no longer affects the resolved URL.
        let sandbox = config.base_url(Environment::Sandbox).unwrap();
        assert_eq!(sandbox.as_str(), "http://127.0.0.1:9000/v1/");
    }

    #[test]
    fn environment_display_and_predicates() {
        assert_eq!(Environment::Live.to_string(), "live");
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
        assert!(Environment::Sandbox.is_sandbox());
        assert!(!Environment::Sandbox.is_live());
        assert!(Environment::Live.is_live());
    }
}
