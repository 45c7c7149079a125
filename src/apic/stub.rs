//! Scripted transport for driving the stages in tests

use super::transport::{ControllerTransport, Reply};
use crate::error::Result;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub cookie: Option<String>,
}

/// Answers requests from a queue of replies and records what was sent
#[derive(Default)]
pub struct StubTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl ControllerTransport for StubTransport {
    fn post_json(&self, url: &str, body: &Value, cookie: Option<&str>) -> Result<Reply> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            cookie: cookie.map(str::to_string),
        });
        let reply = self.replies.borrow_mut().pop_front();
        Ok(reply.unwrap_or_else(|| panic!("unexpected request to {}", url)))
    }
}
