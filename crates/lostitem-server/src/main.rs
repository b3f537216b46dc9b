//! Lost-item matcher HTTP server entrypoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use lostitem::catalog::CatalogIndex;
use lostitem::config::Config;
use lostitem::embedding::HttpEmbeddingProvider;
use lostitem::matcher::{MatchCache, MatchPolicy, Matcher};
use lostitem_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let index = CatalogIndex::load(&config.catalog_path)?;

    if let Some(out) = pack_target(&args)? {
        index.write_snapshot(&out)?;
        tracing::info!(
            out = %out.display(),
            aliases = index.len(),
            "Catalog snapshot written"
        );
        return Ok(());
    }

    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model_server = %config.model_server_url,
        threshold = config.match_threshold,
        "Lost-item matcher starting"
    );

    let provider = HttpEmbeddingProvider::from_config(&config)?;
    let matcher = Matcher::with_cache(
        Arc::new(index),
        provider,
        MatchCache::new(),
        MatchPolicy::from_config(&config),
    );

    let app = create_router_with_state(HandlerState::new(Arc::new(matcher)));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Lost-item matcher shutdown complete");
    Ok(())
}

/// Output path following `--pack`, if the flag is present.
fn pack_target(args: &[String]) -> anyhow::Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|arg| arg == "--pack") else {
        return Ok(None);
    };

    args.get(pos + 1)
        .filter(|value| !value.starts_with("--"))
        .map(|value| Some(PathBuf::from(value)))
        .ok_or_else(|| anyhow::anyhow!("--pack requires an output path"))
}

async fn run_health_check() -> i32 {
    let port = Config::from_env()
        .map(|config| config.port)
        .unwrap_or_else(|_| Config::default().port);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
