//! Test harness: a canned-response backend and a command runner.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use clap::Parser;

use tofula_app::cli::Cli;
use tofula_app::commands::{self, Context};
use tofula_app::config::{AppConfig, LogFormat};
use tofula_client::{ClientConfig, Session};

type Canned = Arc<Mutex<HashMap<(String, String), (u16, String)>>>;

#[derive(Clone, Default)]
struct Backend {
    canned: Canned,
    hits: Arc<Mutex<Vec<String>>>,
}

pub struct TestApp {
    backend: Backend,
    pub session: Session,
    pub ctx: Context,
}

impl TestApp {
    pub async fn start() -> Self {
        let backend = Backend::default();
        let app = Router::new().fallback(handle).with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = AppConfig {
            client: ClientConfig::new(format!("http://{addr}")).timeout_secs(5),
            state_dir: std::env::temp_dir(),
            log_format: LogFormat::Text,
        };
        let session = Session::in_memory();
        let ctx = Context::new(&config, session.clone()).unwrap();
        Self {
            backend,
            session,
            ctx,
        }
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.backend.canned.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
    }

    /// `METHOD /path?query` for every request the backend saw.
    pub fn hits(&self) -> Vec<String> {
        self.backend.hits.lock().unwrap().clone()
    }

    /// Run `tofula <args>` and return its stdout.
    pub async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("tofula").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        commands::run(cli, &self.ctx, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }
}

async fn handle(State(backend): State<Backend>, method: Method, uri: Uri) -> Response {
    let hit = match uri.query() {
        Some(q) => format!("{method} {}?{q}", uri.path()),
        None => format!("{method} {}", uri.path()),
    };
    backend.hits.lock().unwrap().push(hit);

    let canned = backend
        .canned
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
        None => (StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#.to_string()).into_response(),
    }
}

pub fn template_json(id: &str, age_range: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Story {id}"),
        "themes": "friendship",
        "age_range": age_range,
        "status": status,
        "pages": [{"page_number": 1, "template_text": "Once", "base_prompt": "meadow"}]
    })
}
