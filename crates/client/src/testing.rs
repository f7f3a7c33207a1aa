//! In-memory doubles for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use fieldmap_core::contract::{ActionResult, Command};
use fieldmap_core::mapping::MappingDocument;
use tokio::sync::Notify;

use crate::api::MappingApi;
use crate::error::ApiError;
use crate::ui::{Presentation, UiUpdate};

/// Scripted answer to one [`MappingApi::send`] call.
#[derive(Debug, Clone)]
pub enum Reply {
    Success,
    Refuse(Option<String>),
    Status(u16, String),
}

/// [`MappingApi`] that records commands and answers from a script.
///
/// Once the script runs out every request is accepted.
#[derive(Default)]
pub struct FakeApi {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<Command>>,
    fetches: AtomicUsize,
    documents: Mutex<VecDeque<(Duration, Result<MappingDocument, (u16, String)>)>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Hold every `send` until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue the result of the next `fetch_document` call. Unscripted
    /// fetches return an empty document.
    pub fn push_document(&self, document: Result<MappingDocument, (u16, String)>) {
        self.push_document_after(Duration::ZERO, document);
    }

    /// Like [`FakeApi::push_document`], but the fetch takes `delay` to
    /// answer.
    pub fn push_document_after(
        &self,
        delay: Duration,
        document: Result<MappingDocument, (u16, String)>,
    ) {
        self.documents.lock().unwrap().push_back((delay, document));
    }

    pub fn sent(&self) -> Vec<Command> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MappingApi for FakeApi {
    async fn send(&self, command: &Command) -> Result<ActionResult, ApiError> {
        self.sent.lock().unwrap().push(command.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Reply::Success);
        match reply {
            Reply::Success => Ok(ActionResult::ok()),
            Reply::Refuse(error) => Ok(ActionResult::refused(error)),
            Reply::Status(status, body) => Err(ApiError::Status { status, body }),
        }
    }

    async fn fetch_document(&self) -> Result<MappingDocument, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let scripted = self.documents.lock().unwrap().pop_front();
        let Some((delay, document)) = scripted else {
            return Ok(MappingDocument::default());
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        document.map_err(|(status, body)| ApiError::Status { status, body })
    }

    fn download_url(&self) -> String {
        "http://fake/download_output".to_string()
    }
}

/// [`Presentation`] that keeps every update it receives.
#[derive(Default)]
pub struct RecordingPresentation {
    updates: Mutex<Vec<UiUpdate>>,
}

impl RecordingPresentation {
    pub fn updates(&self) -> Vec<UiUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<UiUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn hide_count(&self) -> usize {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .filter(|u| matches!(u, UiUpdate::HideStatus))
            .count()
    }
}

impl Presentation for RecordingPresentation {
    fn apply(&self, update: UiUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}
