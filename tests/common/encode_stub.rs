//! In-process stand-in for the model server's `POST /encode`.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use lostitem::embedding::{EncodeRequest, EncodeResponse};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the stub answers every request.
#[derive(Debug, Clone)]
pub enum StubMode {
    /// Scripted vector for the text, else the default vector.
    Embed,
    /// Bare status code with an empty body.
    Status(StatusCode),
    /// `200` with a body that is not JSON.
    Garbage,
    /// `200` with `{"embeddings": []}`.
    NoRows,
    /// Sleeps before answering as [`StubMode::Embed`].
    Slow(Duration),
}

struct StubState {
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
    mode: Mutex<StubMode>,
    calls: AtomicUsize,
    last_body: Mutex<Option<String>>,
}

pub struct EncodeStub {
    pub addr: SocketAddr,
    state: Arc<StubState>,
    _handle: JoinHandle<()>,
}

impl EncodeStub {
    /// Base URL to hand to `HttpEmbeddingProvider::new`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn set_mode(&self, mode: StubMode) {
        *self.state.mode.lock().unwrap() = mode;
    }

    /// `type` field of the most recent request.
    pub fn last_type(&self) -> Option<String> {
        self.state.last_body.lock().unwrap().clone()
    }
}

pub async fn spawn_encode_stub(
    vectors: HashMap<String, Vec<f32>>,
    default_vector: Vec<f32>,
) -> EncodeStub {
    let state = Arc::new(StubState {
        vectors,
        default_vector,
        mode: Mutex::new(StubMode::Embed),
        calls: AtomicUsize::new(0),
        last_body: Mutex::new(None),
    });

    let app = Router::new()
        .route("/encode", post(encode))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    EncodeStub {
        addr,
        state,
        _handle: handle,
    }
}

async fn encode(State(state): State<Arc<StubState>>, Json(request): Json<EncodeRequest>) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().unwrap() = Some(request.item_type.clone());

    let mode = state.mode.lock().unwrap().clone();
    match mode {
        StubMode::Embed => embed(&state, &request.item_type),
        StubMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            embed(&state, &request.item_type)
        }
        StubMode::Status(status) => status.into_response(),
        StubMode::Garbage => (StatusCode::OK, "definitely not json").into_response(),
        StubMode::NoRows => Json(EncodeResponse { embeddings: vec![] }).into_response(),
    }
}

fn embed(state: &StubState, text: &str) -> Response {
    let vector = state
        .vectors
        .get(text)
        .cloned()
        .unwrap_or_else(|| state.default_vector.clone());
    Json(EncodeResponse {
        embeddings: vec![vector],
    })
    .into_response()
}
