//! In-crate fakes for the transport, control, and timer seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::busy::Control;
use crate::error::{Result, StorefrontError};
use crate::transport::{HttpReply, Transport};
use crate::tutorial::Timer;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Replays scripted replies in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: RefCell<VecDeque<Result<HttpReply>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn fail(self, err: StorefrontError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn next(&self, request: RecordedRequest) -> Result<HttpReply> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(StorefrontError::Transport("no scripted reply".to_owned())))
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<HttpReply> {
        self.next(RecordedRequest {
            method: "GET",
            path: path.to_owned(),
            body: None,
        })
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<HttpReply> {
        self.next(RecordedRequest {
            method: "POST",
            path: path.to_owned(),
            body: Some(body.clone()),
        })
    }
}

pub(crate) struct RecordingControl {
    label: RefCell<String>,
    disabled: Cell<bool>,
    toggles: Cell<usize>,
}

impl RecordingControl {
    pub fn new(label: &str) -> Self {
        Self {
            label: RefCell::new(label.to_owned()),
            disabled: Cell::new(false),
            toggles: Cell::new(0),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn toggles(&self) -> usize {
        self.toggles.get()
    }
}

impl Control for RecordingControl {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_owned();
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        self.toggles.set(self.toggles.get() + 1);
    }
}

/// Returns immediately, remembering each requested delay and running an
/// optional probe while "asleep".
#[derive(Default)]
pub(crate) struct InstantTimer {
    slept: RefCell<Vec<u32>>,
    probe: RefCell<Option<Box<dyn Fn()>>>,
}

impl InstantTimer {
    pub fn with_probe(probe: impl Fn() + 'static) -> Self {
        let timer = Self::default();
        *timer.probe.borrow_mut() = Some(Box::new(probe));
        timer
    }

    pub fn slept(&self) -> Vec<u32> {
        self.slept.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for InstantTimer {
    async fn sleep(&self, ms: u32) {
        self.slept.borrow_mut().push(ms);
        if let Some(probe) = self.probe.borrow().as_ref() {
            probe();
        }
    }
}
