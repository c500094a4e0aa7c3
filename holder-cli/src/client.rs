//! Thin HTTP client for the three gateways, mirroring
//! `original_source/src/user.py`'s `_post_json`/`_get_json` helpers: a
//! non-2xx response is always an error, never silently swallowed.

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::CliError;

/// A minimal wrapper around a `reqwest::Client` bound to nothing in
/// particular — each call takes a full URL, since the holder talks to
/// three independent base URLs (issuer, ledger, verifier).
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Self {
        let inner = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("reqwest client configuration is always valid");
        HttpClient { inner }
    }

    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, CliError> {
        let resp = self.inner.get(url).send().await?;
        Self::decode(resp).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, CliError> {
        let resp = self.inner.post(url).json(body).send().await?;
        Self::decode(resp).await
    }

    /// Like [`Self::post_json`], but does not treat any status code as an
    /// error — used for `POST /verify`, where a `400 {valid:false}` is a
    /// legitimate outcome the caller inspects, not a transport failure.
    pub async fn post_json_any_status<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, CliError> {
        let resp = self.inner.post(url).json(body).send().await?;
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| CliError::Decode(format!("{e}: {text}")))
    }

    async fn decode<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, CliError> {
        let status = resp.status();
        let text = resp.text().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(CliError::Gateway {
                status: status.as_u16(),
                body: text,
            });
        }
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(CliError::Gateway {
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|e| CliError::Decode(format!("{e}: {text}")))
    }
}
