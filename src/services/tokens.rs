//! Token issuance operations.

use crate::client::ClientInner;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestTransport};
use crate::resources::Token;
use crate::time::{Sleeper, TokioSleeper};

/// Token operations.
pub struct Tokens<'a, C = ReqwestTransport, S = TokioSleeper> {
    inner: &'a ClientInner<C, S>,
}

impl<'a, C: HttpClient, S: Sleeper> Tokens<'a, C, S> {
    pub(crate) const fn new(inner: &'a ClientInner<C, S>) -> Self {
        Self { inner }
    }

    /// Exchanges the current API key for a fresh access token.
    ///
    /// The returned token is not installed as the active credential; use
    /// [`refresh_access_token`](crate::TahsilatClient::refresh_access_token)
    /// for that.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] when the key is rejected
    /// - [`Error::Api`] when no token is returned
    pub async fn fetch(&self) -> Result<Token, Error> {
        let key = self.inner.auth.snapshot().api_key;
        let (_, token) = self.inner.fetch_token_with_key(&key).await?;
        Ok(token)
    }
}
