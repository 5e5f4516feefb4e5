//! Storefront client logic for the Ancient Artisans marketplace.
//!
//! Everything here is browser-agnostic: the HTTP backend, the clock, the
//! key-value storage, and the buttons being toggled sit behind small traits so
//! the wasm front end and native tests drive the same flows.

pub mod auth;
pub mod busy;
pub mod cart;
pub mod chat;
pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod lazy;
pub mod modal;
pub mod navigation;
pub mod payment;
pub mod pricing;
pub mod store;
pub mod templates;
pub mod tooltip;
pub mod transport;
pub mod tutorial;

#[cfg(test)]
mod testing;

pub use busy::{BusyGuard, Control};
pub use config::{Endpoints, StorefrontConfig, TutorialMode};
pub use error::{Result, StorefrontError};
pub use store::{CartCountStore, KeyValueStore, MemoryStore};
pub use transport::{HttpReply, Transport};
