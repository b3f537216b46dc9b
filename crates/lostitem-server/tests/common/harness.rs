//! Test server harness.

use lostitem::catalog::CatalogIndex;
use lostitem::embedding::{EmbeddingProvider, MockEmbeddingProvider};
use lostitem::matcher::{MatchCache, MatchPolicy, Matcher};
use lostitem_server::gateway::{HandlerState, create_router_with_state};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub threshold: f64,
    pub provider_timeout: Duration,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        let policy = MatchPolicy::default();
        Self {
            threshold: policy.threshold,
            provider_timeout: policy.provider_timeout,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Small lost-and-found catalog: two phone aliases, a wallet, and an umbrella.
pub fn sample_index() -> Arc<CatalogIndex> {
    let map = |pairs: &[(&str, &str)]| -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };

    let index = CatalogIndex::from_parts(
        vec![
            "iphone".into(),
            "android phone".into(),
            "wallet".into(),
            "umbrella".into(),
        ],
        vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ],
        map(&[
            ("iphone", "101"),
            ("android phone", "101"),
            ("wallet", "305"),
            ("umbrella", "412"),
        ]),
        map(&[("101", "Smartphone"), ("305", "Wallet"), ("412", "Umbrella")]),
    )
    .expect("sample catalog is valid");

    Arc::new(index)
}

/// Provider scripted for [`sample_index`].
pub fn sample_provider() -> MockEmbeddingProvider {
    MockEmbeddingProvider::new()
        .with_vector("cell phone", vec![0.8, 0.6, 0.0, 0.0])
        .with_vector("brown leather wallet", vec![0.1, 0.0, 0.95, 0.0])
        .with_vector("mystery object", vec![0.5, 0.5, 0.5, 0.5])
}

/// Spawns a server on an ephemeral port around a matcher built from `provider`.
pub async fn spawn_test_server<P>(
    config: TestServerConfig,
    provider: P,
) -> Result<TestServer, ServerStartupError>
where
    P: EmbeddingProvider + 'static,
{
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let policy = MatchPolicy {
        threshold: config.threshold,
        provider_timeout: config.provider_timeout,
    };
    let matcher = Matcher::with_cache(sample_index(), provider, MatchCache::new(), policy);
    let app = create_router_with_state(HandlerState::new(Arc::new(matcher)));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
