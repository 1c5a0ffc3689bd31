//! Curio API HTTP Client
//!
//! JSON over plain request/response against `{base_url}`. Ids are appended as
//! percent-encoded path segments. Non-2xx responses become
//! `TransportError::Status` carrying the response body; undecodable bodies
//! become `TransportError::Decode`.

use std::time::Duration;

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use curio_common::{Error, Result, TransportError};

use super::{ArtefactRemote, RemoteConfig};
use crate::domain::entities::{
    ArtefactChanges, ArtefactRecord, CommentRecord, NewArtefact, NewComment, Notification,
    OwnerProfile,
};

/// Real HTTP client for the Curio API.
pub struct HttpArtefactRemote {
    http: Client,
    base_url: Url,
}

impl HttpArtefactRemote {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("Invalid Curio API URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "Curio API URL {:?} cannot take path segments",
                config.base_url
            )));
        }

        Ok(Self { http, base_url })
    }

    /// Base URL with each segment appended, percent-encoded
    fn url(&self, segments: &[&str]) -> std::result::Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::Request(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> std::result::Result<Response, TransportError> {
        let url = self.url(segments)?;
        tracing::debug!(method = %method, path = %url.path(), "Sending Curio API request");

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            tracing::warn!(status = %status, path = %url.path(), "Curio API returned an error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> std::result::Result<T, TransportError> {
        let response = self.send(method, segments, body).await?;
        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> std::result::Result<T, TransportError> {
        self.request_json::<(), T>(Method::GET, segments, None).await
    }
}

#[async_trait::async_trait]
impl ArtefactRemote for HttpArtefactRemote {
    async fn list_user_artefacts(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<ArtefactRecord>, TransportError> {
        self.get_json(&["users", user_id, "artefacts"]).await
    }

    async fn create_artefact(
        &self,
        artefact: &NewArtefact,
    ) -> std::result::Result<ArtefactRecord, TransportError> {
        self.request_json(Method::POST, &["artefacts"], Some(artefact))
            .await
    }

    async fn get_artefact(
        &self,
        artefact_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError> {
        self.get_json(&["artefacts", artefact_id]).await
    }

    async fn update_artefact(
        &self,
        artefact_id: &str,
        changes: &ArtefactChanges,
    ) -> std::result::Result<ArtefactRecord, TransportError> {
        self.request_json(Method::PUT, &["artefacts", artefact_id], Some(changes))
            .await
    }

    async fn delete_artefact(&self, artefact_id: &str) -> std::result::Result<(), TransportError> {
        self.send::<()>(Method::DELETE, &["artefacts", artefact_id], None)
            .await?;
        Ok(())
    }

    async fn like_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError> {
        self.request_json::<(), _>(
            Method::POST,
            &["artefacts", artefact_id, "likes", user_id],
            None,
        )
        .await
    }

    async fn unlike_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError> {
        self.request_json::<(), _>(
            Method::DELETE,
            &["artefacts", artefact_id, "likes", user_id],
            None,
        )
        .await
    }

    async fn list_comments(
        &self,
        artefact_id: &str,
    ) -> std::result::Result<Vec<CommentRecord>, TransportError> {
        self.get_json(&["artefacts", artefact_id, "comments"]).await
    }

    async fn post_comment(
        &self,
        artefact_id: &str,
        comment: &NewComment,
    ) -> std::result::Result<CommentRecord, TransportError> {
        self.request_json(
            Method::POST,
            &["artefacts", artefact_id, "comments"],
            Some(comment),
        )
        .await
    }

    async fn get_user(&self, user_id: &str) -> std::result::Result<OwnerProfile, TransportError> {
        self.get_json(&["users", user_id]).await
    }

    async fn list_user_notifications(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<Notification>, TransportError> {
        self.get_json(&["users", user_id, "notifications"]).await
    }
}
