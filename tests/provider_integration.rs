mod common;

use axum::http::StatusCode;
use common::encode_stub::{StubMode, spawn_encode_stub};
use common::fixtures::{query_vectors, unrelated_vector};
use lostitem::embedding::{EmbeddingProvider, HttpEmbeddingProvider, ProviderError};
use std::time::Duration;

async fn provider_for(url: &str) -> HttpEmbeddingProvider {
    HttpEmbeddingProvider::new(url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_http_provider_posts_type_and_reads_first_row() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = provider_for(&stub.url()).await;

    let embedding = provider.embed("iPhone 13").await.unwrap();

    assert_eq!(embedding, vec![0.82, 0.5724, 0.0, 0.0]);
    assert_eq!(stub.last_type().as_deref(), Some("iPhone 13"));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_http_provider_trailing_slash_base_url() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = provider_for(&format!("{}/", stub.url())).await;

    assert!(provider.embed("anything").await.is_ok());
}

#[tokio::test]
async fn test_http_provider_forwards_empty_text() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = provider_for(&stub.url()).await;

    let embedding = provider.embed("").await.unwrap();
    assert_eq!(embedding, unrelated_vector());
    assert_eq!(stub.last_type().as_deref(), Some(""));
}

#[tokio::test]
async fn test_http_provider_error_status() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = provider_for(&stub.url()).await;

    stub.set_mode(StubMode::Status(StatusCode::INTERNAL_SERVER_ERROR));
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 500 }));

    stub.set_mode(StubMode::Status(StatusCode::NOT_FOUND));
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::Status { status: 404 }));
}

#[tokio::test]
async fn test_http_provider_malformed_bodies() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = provider_for(&stub.url()).await;

    stub.set_mode(StubMode::Garbage);
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse { .. }));

    stub.set_mode(StubMode::NoRows);
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_http_provider_timeout() {
    let stub = spawn_encode_stub(query_vectors(), unrelated_vector()).await;
    let provider = HttpEmbeddingProvider::new(&stub.url(), Duration::from_millis(50)).unwrap();

    stub.set_mode(StubMode::Slow(Duration::from_millis(500)));
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout));
}

#[tokio::test]
async fn test_http_provider_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = provider_for(&format!("http://{addr}")).await;
    let err = provider.embed("iPhone 13").await.unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
}
