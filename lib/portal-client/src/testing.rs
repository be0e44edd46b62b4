use std::{cell::RefCell, collections::VecDeque};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::{PortalError, Result},
    transport::{Reply, Request, Transport},
    ui::{MessageSlot, Ui, ViewUpdate},
};

/// Replays canned replies in order and records every request it was given.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Reply>>>,
    requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(Reply::new(status, body)));
        self
    }

    pub fn fail(self, detail: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(PortalError::Network(detail.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Reply> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PortalError::Network("no scripted reply".to_string())))
    }
}

/// Answers prompts from a queue and keeps everything shown to the user.
#[derive(Default)]
pub struct RecordingUi {
    answers: RefCell<VecDeque<Option<String>>>,
    pub asked: RefCell<Vec<String>>,
    pub notices: RefCell<Vec<String>>,
    pub messages: RefCell<Vec<(MessageSlot, String)>>,
    pub updates: RefCell<Vec<ViewUpdate>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, answer: Option<&str>) -> Self {
        self.answers
            .borrow_mut()
            .push_back(answer.map(str::to_string));
        self
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn last_message(&self, slot: MessageSlot) -> Option<String> {
        self.messages
            .borrow()
            .iter()
            .rev()
            .find(|(s, _)| *s == slot)
            .map(|(_, text)| text.clone())
    }

    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates.borrow().clone()
    }
}

impl Ui for RecordingUi {
    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn prompt(&self, label: &str, _default: &str) -> Option<String> {
        self.asked.borrow_mut().push(label.to_string());
        self.answers.borrow_mut().pop_front().flatten()
    }

    fn set_message(&self, slot: MessageSlot, text: &str) {
        self.messages.borrow_mut().push((slot, text.to_string()));
    }

    fn update(&self, update: ViewUpdate) {
        self.updates.borrow_mut().push(update);
    }
}
