//! Google Cloud Storage Uploader
//!
//! Performs a single-request media upload to
//! `{base_url}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`
//! and returns the object's public URL `{base_url}/{bucket}/{object}`.

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::{ImageUploader, LocalImage};
use curio_common::TransportError;

pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

/// Prefix for artefact photos inside the bucket
const OBJECT_PREFIX: &str = "artefacts";

/// Subset of the GCS object resource returned by an upload
#[derive(Debug, Deserialize)]
struct ObjectResource {
    name: String,
}

/// Uploads artefact photos to a GCS bucket.
pub struct GcsUploader {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    access_token: Option<String>,
}

impl GcsUploader {
    pub fn new(base_url: String, bucket: String, access_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            access_token,
        }
    }

    /// Unique object name, keeping the original extension
    fn object_name(image: &LocalImage) -> String {
        let id = uuid::Uuid::new_v4();
        match image.extension() {
            Some(ext) => format!("{}/{}.{}", OBJECT_PREFIX, id, ext),
            None => format!("{}/{}", OBJECT_PREFIX, id),
        }
    }

    fn public_url(&self, object: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, object)
    }
}

#[async_trait::async_trait]
impl ImageUploader for GcsUploader {
    async fn upload(&self, image: &LocalImage) -> Result<String, TransportError> {
        let bytes = tokio::fs::read(image.path()).await.map_err(|e| {
            TransportError::LocalResource(format!("{}: {}", image.path().display(), e))
        })?;

        let object = Self::object_name(image);
        let url = format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket);

        tracing::debug!(
            bucket = %self.bucket,
            object = %object,
            size = bytes.len(),
            "Uploading image"
        );

        let mut request = self
            .http
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object.as_str())])
            .header(CONTENT_TYPE, image.content_type())
            .body(bytes);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let resource: ObjectResource = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        let public_url = self.public_url(&resource.name);
        tracing::info!(url = %public_url, "Image uploaded");
        Ok(public_url)
    }
}
