//! GCS media upload against a mocked storage API

use curio_common::TransportError;
use curio_upload::{ImageUploader, LocalImage};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{gcs_uploader, temp_image, BUCKET};

#[test_log::test(tokio::test)]
async fn test_upload_posts_media_and_returns_public_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/upload/storage/v1/b/{}/o", BUCKET)))
        .and(query_param("uploadType", "media"))
        .and(header("content-type", "image/jpeg"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "artefacts/abc.jpg" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = LocalImage::new(temp_image(&dir, "watch.jpg"));

    let url = gcs_uploader(&server).upload(&image).await.unwrap();

    assert_eq!(url, format!("{}/{}/artefacts/abc.jpg", server.uri(), BUCKET));

    let requests = server.received_requests().await.unwrap();
    let name = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(name.starts_with("artefacts/"));
    assert!(name.ends_with(".jpg"));
    assert_eq!(requests[0].body, vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[test_log::test(tokio::test)]
async fn test_rejected_upload_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = LocalImage::new(temp_image(&dir, "watch.jpg"));

    let err = gcs_uploader(&server).upload(&image).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
}

#[test_log::test(tokio::test)]
async fn test_missing_file_never_reaches_storage() {
    let server = MockServer::start().await;

    let err = gcs_uploader(&server)
        .upload(&LocalImage::new("/nonexistent/curio/watch.jpg"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::LocalResource(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

mod common;
