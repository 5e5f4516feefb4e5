//! Lazy image loading policy.

use crate::config::StorefrontConfig;

/// Attribute holding the real source until the image nears the viewport.
pub const LAZY_SRC_ATTR: &str = "data-src";
pub const LAZY_SELECTOR: &str = "img[data-src]";
pub const LOADED_CLASS: &str = "loaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Swap sources when an image comes within the root margin.
    Observe,
    /// No proximity observation available: swap every source up front.
    Eager,
}

impl LoadStrategy {
    pub fn detect(observer_supported: bool) -> Self {
        if observer_supported {
            Self::Observe
        } else {
            Self::Eager
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LazyOptions {
    pub root_margin: String,
    pub threshold: f64,
    pub fallback_src: String,
}

impl From<&StorefrontConfig> for LazyOptions {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            root_margin: config.lazy_root_margin.clone(),
            threshold: config.lazy_threshold,
            fallback_src: config.fallback_image.clone(),
        }
    }
}

impl LazyOptions {
    /// Source to try after a load error, or `None` when the failing source
    /// already is the fallback.
    pub fn fallback_for(&self, failed_src: &str) -> Option<&str> {
        if failed_src.ends_with(&self.fallback_src) {
            None
        } else {
            Some(&self.fallback_src)
        }
    }
}
