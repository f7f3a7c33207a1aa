//! Shared helpers for client integration tests.
//!
//! [`MockServer`] is an in-process axum server on `127.0.0.1:0` that
//! records every request and answers from a per-path script.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;

use fieldmap_client::ui::{Presentation, UiUpdate};
use fieldmap_client::{ClientConfig, HttpMappingApi, Notifier, Workbench};

/// Scripted answer for one path.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(u16, String),
    Raw(String),
}

/// A request as received by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    /// Parsed JSON body, or `None` when the body was empty.
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    requests: Vec<Recorded>,
    replies: HashMap<String, Vec<MockReply>>,
    document: Value,
}

#[derive(Clone, Default)]
struct MockState(Arc<Mutex<Inner>>);

pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        state.0.lock().unwrap().document = serde_json::json!({"mappings": [], "mismatches": []});

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Queue a reply for the next request to `path`. Unscripted POSTs
    /// answer `{"success": true}`.
    pub fn reply(&self, path: &str, reply: MockReply) {
        self.state
            .0
            .lock()
            .unwrap()
            .replies
            .entry(path.to_string())
            .or_default()
            .push(reply);
    }

    /// Document served by `GET /mappings`.
    pub fn set_document(&self, document: Value) {
        self.state.0.lock().unwrap().document = document;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.0.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn record(State(state): State<MockState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let parsed = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let mut inner = state.0.lock().unwrap();
    inner.requests.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body: parsed,
    });

    if method == Method::GET && path == "/mappings" {
        return Json(inner.document.clone()).into_response();
    }

    let scripted = inner
        .replies
        .get_mut(&path)
        .filter(|queue| !queue.is_empty())
        .map(|queue| queue.remove(0));

    match scripted {
        Some(MockReply::Json(value)) => Json(value).into_response(),
        Some(MockReply::Status(status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response(),
        Some(MockReply::Raw(body)) => (StatusCode::OK, body).into_response(),
        None => Json(serde_json::json!({"success": true})).into_response(),
    }
}

/// [`Presentation`] that keeps every update it receives.
#[derive(Default)]
pub struct Recorder {
    updates: Mutex<Vec<UiUpdate>>,
}

impl Recorder {
    pub fn updates(&self) -> Vec<UiUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&UiUpdate) -> bool) -> usize {
        self.updates.lock().unwrap().iter().filter(|u| pred(u)).count()
    }
}

impl Presentation for Recorder {
    fn apply(&self, update: UiUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}

/// Build a workbench talking to `base_url` over real HTTP.
pub fn build_workbench(base_url: &str) -> (Workbench<HttpMappingApi, Recorder>, Arc<Recorder>) {
    let config = ClientConfig {
        server_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    let api = Arc::new(HttpMappingApi::new(&config).unwrap());
    let presentation = Arc::new(Recorder::default());
    let notifier = Notifier::new(Arc::clone(&presentation), config.notice_duration());
    (
        Workbench::new(api, Arc::clone(&presentation), notifier),
        presentation,
    )
}
