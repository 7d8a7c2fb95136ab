//! Shared test doubles for the HTTP seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::http::{HttpClient, HttpError, RawRequest, RawResponse};

/// Mock HTTP client that replays a configured sequence of responses and
/// captures every request it receives.
#[derive(Debug)]
pub(crate) struct MockClient {
    responses: Mutex<Vec<Result<RawResponse, HttpError>>>,
    requests: Mutex<Vec<RawRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub(crate) fn new(responses: Vec<Result<RawResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// A client that answers every request with the same JSON body.
    pub(crate) fn json(status: u16, body: &Value) -> Self {
        Self::new(vec![Ok(json_response(status, body))])
    }

    pub(crate) fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub(crate) fn captured_requests(&self) -> Vec<RawRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: RawRequest) -> Result<RawResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);

        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "no more queued responses");
        responses.remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: RawRequest) -> Result<RawResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Builds a buffered JSON response.
pub(crate) fn json_response(status: u16, body: &Value) -> RawResponse {
    RawResponse::new(
        http::StatusCode::from_u16(status).expect("valid status code"),
        serde_json::to_vec(body).expect("serializable body"),
    )
}

/// A successful token-issuance response.
pub(crate) fn token_response(token: &str) -> RawResponse {
    json_response(
        200,
        &json!({
            "status": true,
            "data": {
                "access_token": token,
                "supports_3d": true,
                "supports_2d": false,
            },
        }),
    )
}

/// The header value stored under `name`, if any.
pub(crate) fn header_value<'a>(request: &'a RawRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// The request body as UTF-8 text.
pub(crate) fn body_text(request: &RawRequest) -> String {
    request
        .body
        .as_ref()
        .map(|body| String::from_utf8_lossy(body).into_owned())
        .unwrap_or_default()
}
