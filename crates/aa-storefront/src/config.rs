//! Page configuration.
//!
//! Every field has a default, so a page may embed a partial JSON object (or
//! nothing at all) and still get a working storefront.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorialMode {
    #[default]
    Simulated,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub buyer_login: String,
    pub seller_login: String,
    pub check_user_type: String,
    pub cart_add: String,
    pub cart_list: String,
    pub cart_remove: String,
    pub cart_count: String,
    pub products: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            buyer_login: "/buyer_login".to_owned(),
            seller_login: "/seller_login".to_owned(),
            check_user_type: "/api/check-user-type".to_owned(),
            cart_add: "/cart/add".to_owned(),
            cart_list: "/api/cart".to_owned(),
            cart_remove: "/cart/remove".to_owned(),
            cart_count: "/api/cart/count".to_owned(),
            products: "/products".to_owned(),
        }
    }
}

impl Endpoints {
    pub fn tutorial_generate(&self, product_id: &str) -> String {
        format!(
            "/product/{}/tutorial/generate",
            crate::transport::encode_query_value(product_id)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Prefix for every endpoint. Empty means same origin.
    pub base_url: String,
    pub endpoints: Endpoints,
    pub buyer_redirect: String,
    pub seller_redirect: String,
    pub cart_count_key: String,
    pub tutorial_mode: TutorialMode,
    pub tutorial_delay_ms: u32,
    pub lazy_root_margin: String,
    pub lazy_threshold: f64,
    pub fallback_image: String,
    pub tooltip_resize_debounce_ms: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoints: Endpoints::default(),
            buyer_redirect: "/buyer_dashboard".to_owned(),
            seller_redirect: "/seller_dashboard".to_owned(),
            cart_count_key: crate::store::CART_COUNT_KEY.to_owned(),
            tutorial_mode: TutorialMode::Simulated,
            tutorial_delay_ms: 1_500,
            lazy_root_margin: "200px 0px".to_owned(),
            lazy_threshold: 0.01,
            fallback_image: "/images/fallback.jpg".to_owned(),
            tooltip_resize_debounce_ms: 100,
        }
    }
}

impl StorefrontConfig {
    /// Parse an embedded config blob. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}
