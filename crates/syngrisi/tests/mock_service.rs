// Mock comparison service for integration tests
//
// A local axum server emulating the service's `/v1/client` API, with
// per-test scripted baselines, snapshots, and check responses. Also hosts
// the ScriptedTarget fake used in place of a real browser.
//
// Note: items appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Scriptable state behind the mock endpoints.
#[derive(Default)]
pub struct MockState {
    /// Baselines by check name, most recent first
    pub baselines: Mutex<HashMap<String, Vec<Value>>>,
    /// Snapshot records by id
    pub snapshots: Mutex<HashMap<String, Value>>,
    /// Response returned by createCheck; a "passed" result when unset
    pub check_response: Mutex<Value>,
    /// When set, createCheck answers with HTTP 500
    pub fail_check: AtomicBool,
    /// Bodies received by startSession
    pub sessions: Mutex<Vec<Value>>,
    /// Test ids received by stopSession
    pub stopped: Mutex<Vec<String>>,
    /// Number of snapshot record queries served
    pub snapshot_queries: AtomicU32,
    /// Multipart field names of the last createCheck request
    pub check_fields: Mutex<Vec<String>>,
    /// Snapshot image filenames fetched from /snapshoots
    pub image_fetches: Mutex<Vec<String>>,
}

/// Handle to a running mock service.
pub struct MockService {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    state: Arc<MockState>,
}

impl MockService {
    /// Start the mock service on a random available port
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/v1/client/startSession", post(start_session))
            .route("/v1/client/stopSession/{id}", post(stop_session))
            .route("/v1/client/baselines", get(baselines))
            .route("/v1/client/snapshots", get(snapshots))
            .route("/v1/client/createCheck", post(create_check))
            .route("/snapshoots/{filename}", get(snapshot_image))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Failed to get local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock service failed");
        });

        MockService { addr, handle, state }
    }

    /// Base URL of the mock service
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn state(&self) -> &Arc<MockState> {
        &self.state
    }

    /// Registers a baseline for a check name.
    pub fn add_baseline(&self, name: &str, snapshot_id: &str) {
        let baseline = json!({
            "_id": format!("baseline-{snapshot_id}"),
            "name": name,
            "snapshotId": snapshot_id,
        });
        self.state
            .baselines
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .insert(0, baseline);
    }

    /// Registers a snapshot record with the given content hash.
    pub fn add_snapshot(&self, id: &str, filename: &str, imghash: &str) {
        self.state.snapshots.lock().unwrap().insert(
            id.to_string(),
            json!({ "_id": id, "filename": filename, "imghash": imghash }),
        );
    }

    /// Scripts the next createCheck response.
    pub fn set_check_response(&self, response: Value) {
        *self.state.check_response.lock().unwrap() = response;
    }

    pub fn snapshot_queries(&self) -> u32 {
        self.state.snapshot_queries.load(Ordering::SeqCst)
    }

    /// Shutdown the mock service
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

async fn start_session(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    state.sessions.lock().unwrap().push(body);
    Json(json!({ "_id": "test-1" }))
}

async fn stop_session(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Json<Value> {
    state.stopped.lock().unwrap().push(id);
    Json(json!({ "status": "stopped" }))
}

async fn baselines(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let name = params.get("name").cloned().unwrap_or_default();
    let results = state
        .baselines
        .lock()
        .unwrap()
        .get(&name)
        .cloned()
        .unwrap_or_default();
    Json(json!({ "results": results }))
}

async fn snapshots(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.snapshot_queries.fetch_add(1, Ordering::SeqCst);
    let id = params.get("_id").cloned().unwrap_or_default();
    let results: Vec<Value> = state
        .snapshots
        .lock()
        .unwrap()
        .get(&id)
        .cloned()
        .into_iter()
        .collect();
    Json(json!({ "results": results }))
}

async fn create_check(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    if state.fail_check.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "comparison backend down").into_response();
    }

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        fields.push(field.name().unwrap_or_default().to_string());
        let _ = field.bytes().await.expect("field body");
    }
    *state.check_fields.lock().unwrap() = fields;

    let scripted = state.check_response.lock().unwrap().clone();
    let response = if scripted.is_null() {
        json!({ "_id": "check-1", "name": "unnamed", "status": ["passed"] })
    } else {
        scripted
    };
    Json(response).into_response()
}

async fn snapshot_image(
    State(state): State<Arc<MockState>>,
    Path(filename): Path<String>,
) -> Vec<u8> {
    state.image_fetches.lock().unwrap().push(filename.clone());
    format!("png:{filename}").into_bytes()
}

// ============================================================================
// Scripted capture target
// ============================================================================

/// A fake renderable target that plays back a scripted sequence of frames.
///
/// Once the script runs out, the last frame repeats, which models a page
/// that has finished settling.
pub struct ScriptedTarget {
    frames: Mutex<VecDeque<Vec<u8>>>,
    fallback: Vec<u8>,
    capture_delay: Duration,
    events: Mutex<Vec<&'static str>>,
}

impl ScriptedTarget {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        let fallback = frames.last().cloned().unwrap_or_default();
        Self {
            frames: Mutex::new(frames.into()),
            fallback,
            capture_delay: Duration::ZERO,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Makes every capture take at least this long, to exercise the
    /// wall-clock bound.
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    pub fn captures(&self) -> usize {
        self.events().iter().filter(|e| **e == "capture").count()
    }

    fn record(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait::async_trait]
impl syngrisi_rs::Capture for ScriptedTarget {
    async fn capture(&self, _options: &syngrisi_rs::CaptureOptions) -> syngrisi_rs::Result<Vec<u8>> {
        if self.capture_delay > Duration::ZERO {
            tokio::time::sleep(self.capture_delay).await;
        }
        self.record("capture");
        let mut frames = self.frames.lock().unwrap();
        Ok(frames.pop_front().unwrap_or_else(|| self.fallback.clone()))
    }

    async fn wait_for_load(&self, _timeout: Duration) -> syngrisi_rs::Result<()> {
        self.record("load");
        Ok(())
    }

    async fn scroll_through_page(&self) -> syngrisi_rs::Result<()> {
        self.record("scroll");
        Ok(())
    }

    async fn environment(&self) -> syngrisi_rs::Result<syngrisi_rs::Environment> {
        Ok(syngrisi_rs::Environment {
            viewport: "1280x720".to_string(),
            os: "Linux".to_string(),
            browser_version: "119".to_string(),
            browser_full_version: "119.0.6045.9".to_string(),
        })
    }
}
