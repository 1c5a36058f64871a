//! In-process stub of the Tofula backend.
//!
//! Binds an axum server on `127.0.0.1:0`, answers with canned responses
//! keyed by method and path, and records every request it receives so
//! tests can inspect the exact headers, query and body the client sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use tofula_client::{ClientConfig, RecordingNavigator, Session, TofulaApi};

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub studio_password: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = StubState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Answer `method path` with `status` and a raw body.
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().last().cloned().expect("no request reached the stub")
    }

    /// API client pointed at this stub, with a fresh in-memory session.
    pub fn client(&self) -> (TofulaApi, Session, Arc<RecordingNavigator>) {
        let session = Session::in_memory();
        let navigator = Arc::new(RecordingNavigator::new());
        let api = TofulaApi::new(
            &ClientConfig::new(&self.base_url).timeout_secs(5),
            session.clone(),
            navigator.clone(),
        )
        .expect("client should build");
        (api, session, navigator)
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header(AUTHORIZATION.as_str()),
        studio_password: header("x-studio-password"),
        content_type: header(CONTENT_TYPE.as_str()),
        body,
    });

    let canned = state
        .responses
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match canned {
        Some((204, _)) => StatusCode::NO_CONTENT.into_response(),
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not Found"}"#.to_string(),
        )
            .into_response(),
    }
}

/// A backend template record.
pub fn template_json(id: &str, age_range: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Story {id}"),
        "description": "A gentle tale.",
        "cover_image_url": null,
        "themes": "friendship, courage",
        "age_range": age_range,
        "culture": "universal",
        "moral": "Be kind",
        "pages": [
            {"page_number": 1, "template_text": "{child_name} set off.", "base_prompt": "a meadow"}
        ],
        "status": status,
        "created_at": "2025-03-01T10:00:00Z",
        "updated_at": "2025-03-01T10:00:00Z",
        "extra_metadata": {}
    })
}

/// A backend library record.
pub fn instance_json(id: &str, status: &str, pdf_url: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Adventure {id}"),
        "template_id": "tpl-1",
        "child_name": "Maya",
        "age": 6,
        "status": status,
        "created_at": "2025-03-02T09:30:00Z",
        "pdf_url": pdf_url
    })
}
