//! End-to-end artefact flows: actions driving the real HTTP clients

use std::sync::Arc;

use chrono::NaiveDate;
use curio_artefacts::domain::entities::{ArtefactDraft, Privacy};
use curio_artefacts::{ArtefactActions, ArtefactStore, EntryState};
use curio_upload::mock::MockImageUploader;
use curio_upload::LocalImage;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{artefact_json, comment_json, gcs_uploader, http_remote, temp_image, user_json};

fn actions_with_gcs(server: &MockServer) -> ArtefactActions {
    ArtefactActions::new(
        Arc::new(http_remote(server)),
        Arc::new(gcs_uploader(server)),
        ArtefactStore::new(),
        "u1",
    )
}

/// Method and path of every request the server saw, in order
async fn request_log(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_create_uploads_posts_then_refreshes_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/upload/storage/v1/b/[^/]+/o$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "name": "artefacts/new.jpg" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let expected_url = format!("{}/curio-test/artefacts/new.jpg", server.uri());
    Mock::given(method("POST"))
        .and(path("/api/artefacts"))
        .and(body_partial_json(json!({
            "userId": "u1",
            "title": "Pocket watch",
            "dateObtained": "1998-06-14",
            "privacy": 1,
            "imageURL": expected_url
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(artefact_json("a9", "u1", "Pocket watch")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1/artefacts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([artefact_json("a9", "u1", "Pocket watch")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = LocalImage::new(temp_image(&dir, "watch.jpg"));
    let actions = actions_with_gcs(&server);

    let created = actions
        .create_artefact(
            ArtefactDraft {
                owner_id: "u1".to_string(),
                title: "Pocket watch".to_string(),
                description: "Still ticks".to_string(),
                category: "Heirloom".to_string(),
                date_obtained: NaiveDate::from_ymd_opt(1998, 6, 14),
                privacy: Privacy::Private,
            },
            image,
        )
        .await
        .unwrap();

    assert_eq!(created.id, "a9");
    assert_eq!(actions.user_artefact_ids(), ["a9"]);
    let log = request_log(&server).await;
    assert_eq!(log.len(), 3);
    assert!(log[0].starts_with("POST /upload/storage/v1/b/"));
    assert_eq!(log[1], "POST /api/artefacts");
    assert_eq!(log[2], "GET /api/users/u1/artefacts");
}

#[test_log::test(tokio::test)]
async fn test_create_aborts_when_upload_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/upload/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let actions = actions_with_gcs(&server);

    let err = actions
        .create_artefact(
            ArtefactDraft {
                owner_id: "u1".to_string(),
                title: "Pocket watch".to_string(),
                description: "Still ticks".to_string(),
                category: "Heirloom".to_string(),
                date_obtained: NaiveDate::from_ymd_opt(1998, 6, 14),
                privacy: Privacy::Public,
            },
            LocalImage::new(temp_image(&dir, "watch.jpg")),
        )
        .await
        .unwrap_err();

    assert_eq!(err.as_transport().and_then(|e| e.status()), Some(500));
    assert_eq!(request_log(&server).await.len(), 1);
    assert!(actions.snapshot().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_edit_without_image_keeps_url_and_skips_upload() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/artefacts/a1"))
        .and(body_partial_json(json!({
            "title": "Renamed",
            "images": [{ "URL": "https://img.example.com/a1.jpg" }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(artefact_json("a1", "u1", "Renamed")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1/artefacts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([artefact_json("a1", "u1", "Renamed")])),
        )
        .mount(&server)
        .await;

    let uploader = MockImageUploader::new();
    let actions = ArtefactActions::new(
        Arc::new(http_remote(&server)),
        Arc::new(uploader.clone()),
        ArtefactStore::new(),
        "u1",
    );
    let mut record: curio_artefacts::ArtefactRecord =
        serde_json::from_value(artefact_json("a1", "u1", "Pocket watch")).unwrap();
    record.title = "Renamed".to_string();

    let updated = actions.edit_artefact(record, None).await.unwrap();

    assert_eq!(updated.title, "Renamed");
    assert!(uploader.recorded_uploads().is_empty());
    let entry = actions.entry("a1").unwrap();
    assert_eq!(entry.data.as_ref().unwrap().title, "Renamed");
}

#[test_log::test(tokio::test)]
async fn test_artefact_screen_fills_entry_from_three_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/artefacts/a1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(artefact_json("a1", "u1", "Pocket watch")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/artefacts/a1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            comment_json("late", "a1", "2019-10-03T09:00:00Z"),
            comment_json("early", "a1", "2019-10-01T09:00:00Z"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "Grace")))
        .mount(&server)
        .await;

    let actions = actions_with_gcs(&server);
    let (artefact, comments, owner) = tokio::join!(
        actions.select_artefact("a1"),
        actions.fetch_comments("a1"),
        actions.fetch_artefact_owner("a1", "u1"),
    );
    artefact.unwrap();
    comments.unwrap();
    owner.unwrap();

    let selected = actions.selection().unwrap();
    let entry = selected.entry.unwrap();
    assert!(entry.is_full());
    assert_eq!(entry.status().state, EntryState::DataAndComments);
    let ids: Vec<_> = entry
        .comments
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, ["early", "late"]);
    assert_eq!(entry.owner.as_ref().unwrap().name, "Grace");
}

#[test_log::test(tokio::test)]
async fn test_delete_refreshes_list_then_notifications() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/artefacts/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1/artefacts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([artefact_json("a2", "u1", "Tea set")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let actions = actions_with_gcs(&server);
    actions.delete_artefact("a1").await.unwrap();

    assert_eq!(
        request_log(&server).await,
        vec![
            "DELETE /api/artefacts/a1",
            "GET /api/users/u1/artefacts",
            "GET /api/users/u1/notifications"
        ]
    );
    assert_eq!(actions.user_artefact_ids(), ["a2"]);
}

#[test_log::test(tokio::test)]
async fn test_post_comment_refetches_comments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/artefacts/a1/comments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(comment_json("c2", "a1", "2019-10-02T09:00:00Z")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/artefacts/a1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            comment_json("c1", "a1", "2019-10-01T09:00:00Z"),
            comment_json("c2", "a1", "2019-10-02T09:00:00Z"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let actions = actions_with_gcs(&server);
    let posted = actions.post_comment("a1", "u2", "Lovely").await.unwrap();

    assert_eq!(posted.id, "c2");
    let entry = actions.entry("a1").unwrap();
    assert_eq!(entry.comments.as_ref().unwrap().len(), 2);
    assert_eq!(entry.status().state, EntryState::CommentsOnly);
}

mod common;
