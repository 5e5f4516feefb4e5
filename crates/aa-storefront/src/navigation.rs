//! Product listing navigation targets.

use crate::config::StorefrontConfig;
use crate::transport::with_query;

/// Listing URL for a search box submission; blank queries go nowhere.
pub fn search_url(config: &StorefrontConfig, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(with_query(&config.endpoints.products, "search", query))
}

pub fn category_url(config: &StorefrontConfig, category: &str) -> String {
    with_query(&config.endpoints.products, "category", category)
}
