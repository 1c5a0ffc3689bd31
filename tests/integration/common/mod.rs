//! Common test utilities and fixtures for integration tests
//!
//! Payload builders in the Curio API wire format and helpers for pointing
//! the real HTTP clients at a `wiremock` server.

#![allow(dead_code)]

use curio_artefacts::remote::client::HttpArtefactRemote;
use curio_artefacts::RemoteConfig;
use curio_upload::gcs::GcsUploader;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const BUCKET: &str = "curio-test";

/// HTTP remote whose API base is `{server}/api`
pub fn http_remote(server: &MockServer) -> HttpArtefactRemote {
    HttpArtefactRemote::new(&RemoteConfig {
        provider: "http".to_string(),
        base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
    })
    .expect("HTTP client should build")
}

/// GCS uploader whose storage base is the mock server itself
pub fn gcs_uploader(server: &MockServer) -> GcsUploader {
    GcsUploader::new(
        server.uri(),
        BUCKET.to_string(),
        Some("test-token".to_string()),
    )
}

pub fn artefact_json(id: &str, owner_id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "userId": owner_id,
        "title": title,
        "description": "Passed down from my grandmother",
        "category": "Heirloom",
        "dateObtained": "1999-04-01",
        "privacy": 0,
        "images": [{ "URL": format!("https://img.example.com/{}.jpg", id) }],
        "likes": [],
        "datePosted": "2019-10-01T12:00:00Z"
    })
}

pub fn comment_json(id: &str, artefact_id: &str, posted_at: &str) -> Value {
    json!({
        "_id": id,
        "artefactId": artefact_id,
        "posterId": "u2",
        "posterName": "Ada",
        "posterPic": "https://img.example.com/ada.png",
        "content": format!("comment {}", id),
        "datePosted": posted_at
    })
}

pub fn user_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "profilePic": format!("https://img.example.com/{}.png", id)
    })
}

/// Write a small JPEG-looking file and return its path
pub fn temp_image(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).expect("temp image should be writable");
    path
}
