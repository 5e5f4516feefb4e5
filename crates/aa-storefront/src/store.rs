//! Client-side cart count store.
//!
//! The count is mirrored into a string key-value store (localStorage in the
//! browser) on every change, and every change is pushed to the subscribed
//! renderers. Handlers receive the store explicitly instead of reaching for
//! ambient globals.

use std::cell::RefCell;
use std::collections::HashMap;

pub const CART_COUNT_KEY: &str = "cartCount";

/// String key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

type Listener = Box<dyn Fn(i64)>;

pub struct CartCountStore<S: KeyValueStore> {
    storage: S,
    key: String,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: KeyValueStore> CartCountStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_COUNT_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_owned(),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a renderer. It is called on every change and by `refresh`.
    pub fn subscribe(&self, listener: impl Fn(i64) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Last persisted count; anything unreadable counts as zero.
    pub fn current(&self) -> i64 {
        self.storage
            .get(&self.key)
            .map(|raw| parse_count(&raw))
            .unwrap_or(0)
    }

    /// Shift the count by `delta`, persist, and re-render.
    pub fn apply_delta(&self, delta: i64) -> i64 {
        let next = self.current().saturating_add(delta);
        self.write(next);
        next
    }

    /// Replace the count with an authoritative value, persist, and re-render.
    pub fn set(&self, count: i64) {
        self.write(count);
    }

    /// Re-render from the persisted value without changing it.
    pub fn refresh(&self) -> i64 {
        let count = self.current();
        self.notify(count);
        count
    }

    fn write(&self, count: i64) {
        self.storage.set(&self.key, &count.to_string());
        tracing::debug!(key = %self.key, count, "cart count updated");
        self.notify(count);
    }

    fn notify(&self, count: i64) {
        for listener in self.listeners.borrow().iter() {
            listener(count);
        }
    }
}

/// Badges are only shown for a positive count.
pub fn badge_visible(count: i64) -> bool {
    count > 0
}

/// Leading-integer parse: `"12"` and `"12abc"` read as 12, junk reads as 0.
fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let sign_len = usize::from(trimmed.starts_with('-') || trimmed.starts_with('+'));
    let digits_end = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |idx| idx + sign_len);
    trimmed[..digits_end].parse().unwrap_or(0)
}
