//! Trailing-edge debounce by clear-and-rearm.
//!
//! `H` is a timer handle that cancels its timer when dropped, as gloo's
//! `Timeout` does. Every `call` arms a fresh timer and drops the previous
//! handle, so only the timer armed by the last call of a burst can fire.

#[derive(Debug)]
pub struct Debouncer<H> {
    wait_ms: u32,
    armed: Option<H>,
}

impl<H> Debouncer<H> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            armed: None,
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Arm a timer for `wait_ms` via `arm`, cancelling the one armed before.
    pub fn call(&mut self, arm: impl FnOnce(u32) -> H) {
        self.armed = Some(arm(self.wait_ms));
    }

    /// Whether any timer has been armed. A fired handle stays in place until
    /// the next call replaces it.
    pub fn has_armed(&self) -> bool {
        self.armed.is_some()
    }
}
