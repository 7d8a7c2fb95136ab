//! Raw HTTP request/response types, the client trait and the production
//! reqwest-backed implementation.

use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};

/// Boxed error type carried by transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A single outbound HTTP exchange, fully prepared.
///
/// Headers are an ordered list of sanitized name/value pairs and the body,
/// when present, is already encoded for the negotiated content type.
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// HTTP method.
    pub method: http::Method,
    /// Target URL, query string included.
    pub url: url::Url,
    /// Ordered request headers.
    pub headers: Vec<(String, String)>,
    /// Encoded request body.
    pub body: Option<Vec<u8>>,
}

impl RawRequest {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub const fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }
}

/// A buffered HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: http::StatusCode,
    /// Response body (fully buffered).
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Error type for a single HTTP exchange.
///
/// The first four kinds form the transient allow-list: they are the only
/// failures the transport retries. [`HttpError::Other`] covers everything
/// else (request building, body streaming) and always fails fast.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Establishing the connection failed.
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// Host name resolution failed.
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The TLS handshake failed.
    #[error("TLS handshake failed: {0}")]
    Tls(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Other(#[source] BoxError),
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether a failure is on the transient allow-list and
/// therefore worth another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Dns(_) | Self::Timeout | Self::Tls(_) => true,
            Self::Other(_) => false,
        }
    }
}

/// Trait for performing one HTTP exchange.
///
/// # Design
///
/// This trait abstracts the HTTP client implementation, enabling:
/// - Dependency injection for testing with mock clients
/// - Swapping HTTP libraries without changing calling code
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on any transport-level failure. HTTP error
    /// statuses are not failures at this layer; they come back as a
    /// [`RawResponse`].
    fn request(
        &self,
        req: RawRequest,
    ) -> impl std::future::Future<Output = Result<RawResponse, HttpError>> + Send;
}

/// Production HTTP client backed by reqwest.
///
/// Applies the configured timeouts and TLS policy, never follows
/// redirects, and advertises the SDK user agent.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the production transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the CA bundle cannot be read or parsed,
    /// or when the underlying client cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            // Redirects are never followed: a redirecting response must not
            // re-send the bearer credential elsewhere.
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(user_agent());

        if config.verify_ssl_certs {
            if let Some(path) = &config.ca_bundle_path {
                let pem = std::fs::read(path).map_err(|source| ConfigError::CaBundleRead {
                    path: path.clone(),
                    source,
                })?;
                let certificate = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                    ConfigError::CaBundleInvalid {
                        path: path.clone(),
                        reason: e.to_string(),
                    }
                })?;
                builder = builder.add_root_certificate(certificate);
            }
        } else {
            // Only reachable through an explicit opt-out in configuration.
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Creates a transport from an existing reqwest client.
    ///
    /// Useful when the application already maintains a tuned client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl HttpClient for ReqwestTransport {
    async fn request(&self, req: RawRequest) -> Result<RawResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(classify_reqwest_error)?
            .to_vec();

        Ok(RawResponse::new(status, body))
    }
}

/// Maps a reqwest error onto the transient allow-list kinds.
///
/// reqwest does not distinguish DNS and TLS failures as categories, so the
/// error chain is inspected for the usual markers before falling back to
/// the connect/other split.
fn classify_reqwest_error(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        return HttpError::Timeout;
    }

    let description = error_chain(&error);
    let lowered = description.to_lowercase();

    if lowered.contains("dns") || lowered.contains("resolve") {
        return HttpError::Dns(description);
    }
    if lowered.contains("tls")
        || lowered.contains("certificate")
        || lowered.contains("handshake")
    {
        return HttpError::Tls(description);
    }
    if error.is_connect() {
        return HttpError::Connect(Box::new(error));
    }

    HttpError::Other(Box::new(error))
}

/// Collects the display strings of an error and its sources.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

/// The User-Agent advertised on every request.
fn user_agent() -> String {
    format!(
        "tahsilat-rust/{} (rust; reqwest)",
        env!("CARGO_PKG_VERSION")
    )
}
