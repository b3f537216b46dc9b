//! Catalog fixtures shared by the integration tests.

use lostitem::catalog::{ALIAS_TO_CODE_FILE, ALIASES_FILE, CODE_TO_NAME_FILE, EMBEDDINGS_FILE};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

pub const DIM: usize = 4;

/// Writes the four catalog artifacts into a fresh temp directory.
///
/// Aliases: `iphone`, `android phone` (101 Smartphone), `wallet`, `purse`
/// (305 Wallet), `umbrella` (412 Umbrella).
pub fn write_catalog_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_artifacts(dir.path());
    dir
}

pub fn write_artifacts(dir: &Path) {
    let files = [
        (
            ALIASES_FILE,
            json!(["iphone", "android phone", "wallet", "purse", "umbrella"]),
        ),
        (
            EMBEDDINGS_FILE,
            json!([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.8, 0.6],
                [0.0, 0.0, 0.0, 1.0]
            ]),
        ),
        (
            ALIAS_TO_CODE_FILE,
            json!({
                "iphone": "101",
                "android phone": "101",
                "wallet": "305",
                "purse": "305",
                "umbrella": "412"
            }),
        ),
        (
            CODE_TO_NAME_FILE,
            json!({"101": "Smartphone", "305": "Wallet", "412": "Umbrella"}),
        ),
    ];

    for (name, value) in files {
        std::fs::write(dir.join(name), value.to_string()).expect("write artifact");
    }
}

/// Query vectors understood by the encode stub.
pub fn query_vectors() -> HashMap<String, Vec<f32>> {
    [
        ("iPhone 13", vec![0.82, 0.5724, 0.0, 0.0]),
        ("black umbrella", vec![0.1, 0.0, 0.2, 0.97]),
        ("leather purse", vec![0.0, 0.0, 0.8, 0.6]),
        ("mystery object", vec![0.5, 0.5, 0.5, -0.5]),
    ]
    .into_iter()
    .map(|(text, vector)| (text.to_string(), vector))
    .collect()
}

/// Vector the stub returns for unscripted text: far from every alias.
pub fn unrelated_vector() -> Vec<f32> {
    vec![-1.0, -1.0, -1.0, -1.0]
}
