//! The Tahsilat API client.
//!
//! [`TahsilatClient`] owns its configuration and credentials (no process
//! globals), so several independent clients can coexist in one process.
//! Construction validates the API key locally, then exchanges it for a
//! short-lived access token unless
//! [`skip_token_fetch`](crate::ClientConfig::skip_token_fetch) is set.
//!
//! # Example
//!
//! ```no_run
//! use tahsilat::{ClientConfig, TahsilatClient};
//!
//! # async fn example() -> Result<(), tahsilat::Error> {
//! let client = TahsilatClient::new("sk_test_abc123", ClientConfig::new()).await?;
//!
//! let transaction = client.transactions().retrieve(78_810_412_652_494_i64).await?;
//! if transaction.is_success() {
//!     println!("paid: {} {}", transaction.amount_decimal(), "TRY");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use http::Method;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::auth::{AccessToken, ApiKey, AuthState, RequestKind};
use crate::config::{ClientConfig, ConfigError, Environment};
use crate::error::{ApiError, Error};
use crate::http::{HttpClient, ReqwestTransport, RetryPolicy, Transport};
use crate::resources::Token;
use crate::services::{
    BinLookups, Commissions, Customers, Payments, Products, Tokens, Transactions,
};
use crate::time::{Sleeper, TokioSleeper};

/// Client for the Tahsilat API.
///
/// Cheap to clone (the inner state is shared) and safe to use from
/// multiple tasks concurrently. Key rotation via [`set_api_key`] is
/// serialized against in-flight rotations and completes fully before
/// returning.
///
/// # Type Parameters
///
/// - `C`: the HTTP client implementation
/// - `S`: the sleeper used between retries (defaults to [`TokioSleeper`])
///
/// [`set_api_key`]: TahsilatClient::set_api_key
pub struct TahsilatClient<C = ReqwestTransport, S = TokioSleeper> {
    inner: Arc<ClientInner<C, S>>,
}

impl<C, S> Clone for TahsilatClient<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TahsilatClient {
    /// Creates a client and performs the access-token bootstrap.
    ///
    /// The key is validated locally before any network call. Unless
    /// `skip_token_fetch` is set, the token-issuance endpoint is invoked
    /// and a failure there is fatal: no partially usable client is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] for a malformed key or a rejected
    ///   issuance call
    /// - [`Error::Api`] / [`Error::Network`] when issuance fails
    /// - [`Error::Config`] when the HTTP client cannot be built
    pub async fn new(api_key: &str, config: ClientConfig) -> Result<Self, Error> {
        let key = ApiKey::parse(api_key)?;
        let transport = Transport::from_config(&config)?;
        Self::bootstrap(key, config, transport).await
    }
}

impl<C: HttpClient, S: Sleeper> TahsilatClient<C, S> {
    /// Creates a client over a custom transport and sleeper.
    ///
    /// Intended for tests and for applications that maintain their own
    /// HTTP client. The configured `max_retries` still applies.
    ///
    /// # Errors
    ///
    /// Same as [`TahsilatClient::new`].
    pub async fn with_transport(
        api_key: &str,
        config: ClientConfig,
        client: C,
        sleeper: S,
    ) -> Result<Self, Error> {
        let key = ApiKey::parse(api_key)?;
        let retry_policy = RetryPolicy::new().with_max_retries(config.max_retries);
        let transport = Transport::new(client, sleeper).with_retry_policy(retry_policy);
        Self::bootstrap(key, config, transport).await
    }

    async fn bootstrap(
        key: ApiKey,
        config: ClientConfig,
        transport: Transport<C, S>,
    ) -> Result<Self, Error> {
        let skip_token_fetch = config.skip_token_fetch;
        let inner = Arc::new(ClientInner {
            auth: AuthState::new(key),
            config,
            transport,
        });
        let client = Self { inner };

        if !skip_token_fetch {
            let key = client.inner.auth.snapshot().api_key;
            let (token, _) = client.inner.fetch_token_with_key(&key).await?;
            client.inner.auth.install_token(token);
            debug!(environment = %client.environment(), "access token bootstrap complete");
        }

        Ok(client)
    }

    /// The environment the current API key routes to.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.inner.auth.environment()
    }

    /// The active access token, once obtained.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .auth
            .snapshot()
            .access_token
            .map(|token| token.as_str().to_owned())
    }

    /// Fetches a fresh access token for the current key and installs it.
    ///
    /// Useful after constructing with `skip_token_fetch`.
    ///
    /// # Errors
    ///
    /// Returns the issuance failure; the previous token stays active.
    pub async fn refresh_access_token(&self) -> Result<Token, Error> {
        let _guard = self.inner.auth.rotation_guard().await;
        let key = self.inner.auth.snapshot().api_key;
        let (token, resource) = self.inner.fetch_token_with_key(&key).await?;
        self.inner.auth.install_token(token);
        Ok(resource)
    }

    /// Rotates to a new API key.
    ///
    /// Validates the key, fetches a token for it, then atomically swaps
    /// both in. Rotations are mutually exclusive: no request observes the
    /// new key with a stale token. On failure the previous credentials
    /// remain active.
    ///
    /// # Errors
    ///
    /// Same as [`TahsilatClient::new`].
    pub async fn set_api_key(&self, api_key: &str) -> Result<(), Error> {
        let key = ApiKey::parse(api_key)?;
        let _guard = self.inner.auth.rotation_guard().await;
        let (token, _) = self.inner.fetch_token_with_key(&key).await?;
        self.inner.auth.replace(key, Some(token));
        debug!(environment = %self.environment(), "API key rotated");
        Ok(())
    }

    /// Token operations.
    #[must_use]
    pub fn tokens(&self) -> Tokens<'_, C, S> {
        Tokens::new(&self.inner)
    }

    /// Customer operations.
    #[must_use]
    pub fn customers(&self) -> Customers<'_, C, S> {
        Customers::new(&self.inner)
    }

    /// Product operations.
    #[must_use]
    pub fn products(&self) -> Products<'_, C, S> {
        Products::new(&self.inner)
    }

    /// Payment operations.
    #[must_use]
    pub fn payments(&self) -> Payments<'_, C, S> {
        Payments::new(&self.inner)
    }

    /// Transaction operations: retrieval, refunds, pre-auth resolution.
    #[must_use]
    pub fn transactions(&self) -> Transactions<'_, C, S> {
        Transactions::new(&self.inner)
    }

    /// Commission queries.
    #[must_use]
    pub fn commissions(&self) -> Commissions<'_, C, S> {
        Commissions::new(&self.inner)
    }

    /// BIN lookups.
    #[must_use]
    pub fn bin_lookup(&self) -> BinLookups<'_, C, S> {
        BinLookups::new(&self.inner)
    }
}

/// Shared state behind a [`TahsilatClient`]: configuration, credentials
/// and the transport. Services borrow this to dispatch requests.
pub(crate) struct ClientInner<C, S> {
    pub(crate) config: ClientConfig,
    pub(crate) auth: AuthState,
    pub(crate) transport: Transport<C, S>,
}

impl<C: HttpClient, S: Sleeper> ClientInner<C, S> {
    /// Dispatches one logical API operation and unwraps the envelope.
    ///
    /// Resolves the base URL from the current key's environment, selects
    /// the credential for the request kind and merges the default
    /// headers. The `data` field of the envelope is returned when
    /// present, otherwise the whole response body.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Map<String, Value>>,
        kind: RequestKind,
    ) -> Result<Value, Error> {
        let credentials = self.auth.snapshot();
        let url = self.endpoint(credentials.api_key.environment(), path)?;
        let headers = default_headers(&method, credentials.bearer_for(kind));

        let response = self.transport.send(method, url, headers, params).await?;
        Ok(response.into_payload())
    }

    /// Exchanges an explicit API key for an access token.
    ///
    /// Used by the construction bootstrap and by key rotation, where the
    /// new key must be used before it becomes the active credential. The
    /// issuance call always authenticates with the key and carries a JSON
    /// content type.
    pub(crate) async fn fetch_token_with_key(
        &self,
        api_key: &ApiKey,
    ) -> Result<(AccessToken, Token), Error> {
        let url = self.endpoint(api_key.environment(), "token/get-token")?;
        let headers = merge_headers(
            default_headers(&Method::POST, api_key.as_str()),
            &[(
                "Content-Type".to_owned(),
                "application/json".to_owned(),
            )],
        );

        let response = self.transport.send(Method::POST, url, headers, None).await?;
        let http_status = response.http_status.as_u16();
        let token: Token = serde_json::from_value(response.into_payload())
            .map_err(|e| ApiError::new(format!("Invalid token response: {e}"), http_status))?;

        match token.access_token.as_deref() {
            Some(value) if !value.is_empty() => Ok((AccessToken::new(value), token)),
            _ => Err(ApiError::new("Failed to fetch access token", http_status).into()),
        }
    }

    /// Resolves an endpoint URL below the environment's base.
    fn endpoint(&self, environment: Environment, path: &str) -> Result<Url, Error> {
        let base = self.config.base_url(environment)?;
        let url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: format!("{base}{path}"),
                reason: e.to_string(),
            })?;
        Ok(url)
    }
}

/// Default headers for every request.
///
/// `Content-Type` defaults to form-urlencoded for body-carrying methods
/// and can be overridden per call (the token issuance uses JSON).
fn default_headers(method: &Method, bearer: &str) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept".to_owned(), "application/json".to_owned()),
        ("Accept-Language".to_owned(), "tr".to_owned()),
    ];

    if *method == Method::POST || *method == Method::PUT || *method == Method::PATCH {
        headers.push((
            "Content-Type".to_owned(),
            "application/x-www-form-urlencoded".to_owned(),
        ));
    }

    headers.push(("Authorization".to_owned(), format!("Bearer {bearer}")));
    headers
}

/// Overlays caller headers on the defaults, matching names
/// case-insensitively.
fn merge_headers(
    mut headers: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }
    headers
}
