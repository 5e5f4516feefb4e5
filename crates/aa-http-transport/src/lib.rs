use aa_storefront::transport::{REQUESTED_WITH_HEADER, join_url};
use aa_storefront::{HttpReply, Result, StorefrontError, Transport};
use async_trait::async_trait;
use tracing::debug;

/// Native HTTP client for the storefront backend.
///
/// Reads `STOREFRONT_URL` from environment at construction time
/// (default: `http://localhost:5000`). Session cookies set by the login
/// endpoints are kept for later cart calls.
pub struct ReqwestTransport {
    base_url: String,
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| std::env::var("STOREFRONT_URL").ok())
            .unwrap_or_else(|| "http://localhost:5000".to_string());
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| StorefrontError::Transport(format!("http client init: {err}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn finish(&self, method: &str, path: &str, sent: reqwest::Result<reqwest::Response>) -> Result<HttpReply> {
        let response = sent.map_err(|err| StorefrontError::Transport(format!("{method} {path}: {err}")))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| StorefrontError::Transport(format!("{method} {path} body: {err}")))?;
        debug!(method, path, status, "storefront response");
        Ok(HttpReply::new(status, body))
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<HttpReply> {
        let sent = self
            .http
            .get(self.url(path))
            .header(REQUESTED_WITH_HEADER.0, REQUESTED_WITH_HEADER.1)
            .send()
            .await;
        self.finish("GET", path, sent).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        let sent = self
            .http
            .post(self.url(path))
            .header(REQUESTED_WITH_HEADER.0, REQUESTED_WITH_HEADER.1)
            .json(body)
            .send()
            .await;
        self.finish("POST", path, sent).await
    }
}
