//! Request seam shared by the browser and native clients.
//!
//! Implementations only move bytes: they report the status code and body
//! text of whatever the backend answered. Interpreting statuses is left to
//! the flows in `auth`, `cart`, and `tutorial`.

use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

use crate::error::{Result, StorefrontError};

/// Header the backend uses to tell script calls from page navigation.
pub const REQUESTED_WITH_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|err| StorefrontError::Parse(format!("{err} (status {})", self.status)))
    }
}

/// Async HTTP seam. Browser futures are not `Send`, so neither is this trait.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> Result<HttpReply>;
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn get(&self, path: &str) -> Result<HttpReply> {
        (**self).get(path).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        (**self).post_json(path, body).await
    }
}

pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// `path?key=value` with the value percent-encoded.
pub fn with_query(path: &str, key: &str, value: &str) -> String {
    format!("{path}?{key}={}", encode_query_value(value))
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        path.to_owned()
    } else {
        format!("{base}{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(204, "").is_success());
        assert!(!HttpReply::new(301, "").is_success());
        assert!(!HttpReply::new(401, "").is_success());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let reply = HttpReply::new(200, "<html>");
        let err = reply.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, StorefrontError::Parse(_)));
    }

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(with_query("/api/cart", "user_id", "42"), "/api/cart?user_id=42");
        assert_eq!(
            with_query("/products", "search", "clay pot&vase"),
            "/products?search=clay%20pot%26vase"
        );
    }

    #[test]
    fn join_url_handles_empty_and_trailing_slash() {
        assert_eq!(join_url("", "/cart/add"), "/cart/add");
        assert_eq!(join_url("http://shop.local/", "/cart/add"), "http://shop.local/cart/add");
    }
}
