//! HTTP API client.
//!
//! Wraps `fetch` (through gloo-net) behind the storefront `Transport` seam.
//! The session cookie rides along on every call.

use aa_storefront::transport::{REQUESTED_WITH_HEADER, join_url};
use aa_storefront::{HttpReply, Result, StorefrontConfig, StorefrontError, Transport};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::RequestCredentials;

pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let credentials = if self.base_url.is_empty() {
            RequestCredentials::SameOrigin
        } else {
            RequestCredentials::Include
        };
        builder
            .header(REQUESTED_WITH_HEADER.0, REQUESTED_WITH_HEADER.1)
            .credentials(credentials)
    }
}

fn transport_error(method: &str, path: &str, err: gloo_net::Error) -> StorefrontError {
    StorefrontError::Transport(format!("{method} {path}: {err}"))
}

async fn into_reply(method: &str, path: &str, response: Response) -> Result<HttpReply> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(method, path, e))?;
    Ok(HttpReply::new(status, body))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, path: &str) -> Result<HttpReply> {
        let url = join_url(&self.base_url, path);
        let response = self
            .prepare(Request::get(&url))
            .send()
            .await
            .map_err(|e| transport_error("GET", path, e))?;
        into_reply("GET", path, response).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        let url = join_url(&self.base_url, path);
        let request = self
            .prepare(Request::post(&url))
            .json(body)
            .map_err(|e| transport_error("POST", path, e))?;
        let response = request
            .send()
            .await
            .map_err(|e| transport_error("POST", path, e))?;
        into_reply("POST", path, response).await
    }
}
