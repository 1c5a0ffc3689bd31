//! Curio Image Upload Service
//!
//! Uploads artefact photos picked on the device before any create/edit call
//! references them:
//! - Google Cloud Storage media upload for production
//! - Mock uploader for testing and development
//! - Configurable provider, bucket, and access token

pub mod gcs;
pub mod mock;

use std::path::{Path, PathBuf};

use curio_common::{Error, Result, TransportError};
use serde::{Deserialize, Serialize};

/// Handle to an image on the local device, as returned by the image picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalImage {
    pub path: PathBuf,
}

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the local path
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// MIME type inferred from the extension
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("heic") => "image/heic",
            _ => "application/octet-stream",
        }
    }
}

/// Image upload configuration
#[derive(Clone)]
pub struct UploadConfig {
    /// Upload provider (gcs, mock)
    pub provider: String,
    /// Destination bucket, required for the gcs provider
    pub bucket: Option<String>,
    /// OAuth bearer token for the bucket
    pub access_token: Option<String>,
    /// Storage API base URL
    pub base_url: String,
}

impl std::fmt::Debug for UploadConfig {
    #[mutants::skip] // Debug output only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadConfig")
            .field("provider", &self.provider)
            .field("bucket", &self.bucket)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UploadConfig {
    /// Create upload config from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("UPLOAD_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let bucket = std::env::var("GCS_BUCKET").ok();
        let access_token = std::env::var("GCS_ACCESS_TOKEN").ok();
        let base_url = std::env::var("GCS_BASE_URL")
            .unwrap_or_else(|_| gcs::DEFAULT_BASE_URL.to_string());

        if provider == "gcs" && bucket.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Configuration(
                "GCS_BUCKET is required for the gcs upload provider".to_string(),
            ));
        }

        Ok(Self {
            provider,
            bucket,
            access_token,
            base_url,
        })
    }
}

/// Image upload trait for different storage backends
#[async_trait::async_trait]
pub trait ImageUploader: Send + Sync {
    /// Upload a local image and return its public URL.
    async fn upload(&self, image: &LocalImage) -> std::result::Result<String, TransportError>;
}

/// Factory for creating ImageUploader implementations
pub struct ImageUploaderFactory;

impl ImageUploaderFactory {
    pub fn create(config: UploadConfig) -> Result<Box<dyn ImageUploader>> {
        match config.provider.as_str() {
            "gcs" => {
                tracing::info!("Creating Google Cloud Storage uploader");
                let bucket = config.bucket.filter(|b| !b.is_empty()).ok_or_else(|| {
                    Error::Configuration(
                        "GCS_BUCKET is required for the gcs upload provider".to_string(),
                    )
                })?;
                Ok(Box::new(gcs::GcsUploader::new(
                    config.base_url,
                    bucket,
                    config.access_token,
                )))
            }
            "mock" => {
                tracing::info!("Creating mock image uploader");
                Ok(Box::new(mock::MockImageUploader::new()))
            }
            provider => Err(Error::Configuration(format!(
                "Unknown upload provider: {}. Supported providers: gcs, mock",
                provider
            ))),
        }
    }
}
