//! Request execution: encoding, retries and response parsing.

use http::Method;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::{classify_failure, ApiError, Error, InvalidRequestError, NetworkError};
use crate::time::{Sleeper, TokioSleeper};

use super::client::{HttpClient, IsRetryable, RawRequest, RawResponse, ReqwestTransport};
use super::envelope::ApiEnvelope;
use super::query;
use super::retry::RetryPolicy;

/// Maximum number of raw body characters quoted in decode errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// A successfully parsed API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status of the response.
    pub http_status: http::StatusCode,
    /// Decoded envelope view.
    pub envelope: ApiEnvelope,
    /// Full decoded response body.
    pub value: Value,
}

impl ApiResponse {
    /// Unwraps the envelope: the `data` field when present, otherwise the
    /// whole response body.
    #[must_use]
    pub fn into_payload(self) -> Value {
        match self.envelope.data {
            Some(data) => data,
            None => self.value,
        }
    }
}

/// Issues one API request: encodes parameters, applies the retry policy to
/// transient failures, parses the JSON envelope and classifies failures.
///
/// # Type Parameters
///
/// - `C`: the HTTP client implementation
/// - `S`: the sleeper used between retries (defaults to [`TokioSleeper`])
#[derive(Debug, Clone)]
pub struct Transport<C = ReqwestTransport, S = TokioSleeper> {
    client: C,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl Transport<ReqwestTransport, TokioSleeper> {
    /// Builds the production transport from client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: ReqwestTransport::from_config(config)?,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::new().with_max_retries(config.max_retries),
        })
    }
}

impl<C, S> Transport<C, S> {
    /// Creates a transport over the given client and sleeper.
    #[must_use]
    pub fn new(client: C, sleeper: S) -> Self {
        Self {
            client,
            sleeper,
            retry_policy: RetryPolicy::new(),
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<C: HttpClient, S: Sleeper> Transport<C, S> {
    /// Sends one logical API request.
    ///
    /// GET/DELETE parameters travel as a query string; other methods carry
    /// a body, JSON-encoded when the `Content-Type` header says
    /// `application/json` and form-urlencoded otherwise.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] on transport failure (after retries for
    ///   transient kinds)
    /// - [`Error::Api`] / [`Error::Authentication`] /
    ///   [`Error::InvalidRequest`] per response classification
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        headers: Vec<(String, String)>,
        params: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse, Error> {
        let request = Self::build_request(method, url, headers, params)?;
        let response = self.execute_with_retry(&request).await?;
        Self::parse_response(&response)
    }

    /// Assembles the raw request: sanitized headers plus encoded
    /// query string or body.
    fn build_request(
        method: Method,
        mut url: Url,
        headers: Vec<(String, String)>,
        params: Option<&Map<String, Value>>,
    ) -> Result<RawRequest, Error> {
        let headers = sanitize_headers(headers);
        let has_params = params.is_some_and(|params| !params.is_empty());
        let mut body = None;

        if let Some(params) = params.filter(|_| has_params) {
            if method == Method::GET || method == Method::DELETE {
                url.set_query(Some(&query::encode(params)));
            } else if json_content_type(&headers) {
                let encoded = serde_json::to_vec(params).map_err(|e| {
                    InvalidRequestError::bad_input(format!("failed to encode request body: {e}"))
                })?;
                body = Some(encoded);
            } else {
                body = Some(query::encode(params).into_bytes());
            }
        }

        let mut request = RawRequest::new(method, url);
        request.headers = headers;
        request.body = body;
        Ok(request)
    }

    /// Runs the request, retrying transient failures per the policy.
    async fn execute_with_retry(&self, request: &RawRequest) -> Result<RawResponse, Error> {
        let mut retries = 0u32;

        loop {
            match self.client.request(request.clone()).await {
                Ok(response) => {
                    debug!(
                        method = %request.method,
                        url = %request.url,
                        status = %response.status,
                        "received API response"
                    );
                    return Ok(response);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(NetworkError::Transport(error).into());
                    }
                    if !self.retry_policy.should_retry(retries) {
                        warn!(
                            method = %request.method,
                            url = %request.url,
                            attempts = retries + 1,
                            "transient failures exhausted the retry budget"
                        );
                        return Err(NetworkError::RetriesExhausted {
                            attempts: retries + 1,
                            last: error,
                        }
                        .into());
                    }

                    retries += 1;
                    let delay = self.retry_policy.delay_for_retry(retries);
                    debug!(
                        method = %request.method,
                        url = %request.url,
                        retry = retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "transient transport failure, backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }
    }

    /// Decodes the body and applies success/failure classification.
    fn parse_response(response: &RawResponse) -> Result<ApiResponse, Error> {
        let http_status = response.status;

        if response.body.is_empty() {
            return Err(ApiError::new("Empty response from API", http_status.as_u16()).into());
        }

        let value: Value = serde_json::from_slice(&response.body).map_err(|e| {
            let excerpt: String = String::from_utf8_lossy(&response.body)
                .chars()
                .take(BODY_EXCERPT_CHARS)
                .collect();
            Error::from(ApiError::new(
                format!("Invalid JSON response: {e}. Response: {excerpt}"),
                http_status.as_u16(),
            ))
        })?;

        let envelope = ApiEnvelope::from_value(&value);

        if envelope.is_failure() || http_status.as_u16() >= 400 {
            return Err(classify_failure(http_status, &envelope, &value));
        }

        Ok(ApiResponse {
            http_status,
            envelope,
            value,
        })
    }
}

/// Strips CR/LF from header names and values before transmission.
///
/// Header-injection prevention: a value assembled from caller input must
/// not smuggle additional header lines.
fn sanitize_headers(headers: Vec<(String, String)>) -> Vec<(String, String)> {
    headers
        .into_iter()
        .map(|(name, value)| (strip_crlf(&name), strip_crlf(&value)))
        .collect()
}

fn strip_crlf(input: &str) -> String {
    input.replace(['\r', '\n'], "")
}

/// Whether the prepared headers negotiate a JSON body.
fn json_content_type(headers: &[(String, String)]) -> bool {
    headers.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("content-type") && value.contains("application/json")
    })
}
