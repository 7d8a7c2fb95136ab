//! HTTP layer: raw client, request execution and response envelopes.
//!
//! This module provides:
//! - Raw request/response types and the client seam ([`RawRequest`],
//!   [`RawResponse`], [`HttpClient`], [`ReqwestTransport`])
//! - Transport-level error kinds and retryability ([`HttpError`],
//!   [`IsRetryable`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - Request execution with envelope parsing ([`Transport`],
//!   [`ApiResponse`])
//! - The uniform response envelope ([`envelope::ApiEnvelope`])

mod client;
pub mod envelope;
pub mod query;
mod retry;
mod transport;


pub use client::{BoxError, HttpClient, HttpError, IsRetryable, RawRequest, RawResponse, ReqwestTransport};
pub use retry::RetryPolicy;
pub use transport::{ApiResponse, Transport};
