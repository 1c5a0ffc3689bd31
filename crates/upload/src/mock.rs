//! Mock Image Uploader Implementation
//!
//! Programmable mock for testing create/edit workflows:
//! - `MockImageUploader`: records every upload request
//! - `MockUploadBehavior`: succeed with a deterministic URL, or fail

use crate::{ImageUploader, LocalImage};
use curio_common::TransportError;
use std::sync::{Arc, Mutex, RwLock};

/// Base of the URLs handed out by the mock
pub const MOCK_STORAGE_URL: &str = "https://mock-storage.example.com/artefacts";

/// Programmable behavior for the mock uploader
#[derive(Debug, Clone, Default)]
pub struct MockUploadBehavior {
    pub failure: Arc<RwLock<Option<TransportError>>>,
}

impl MockUploadBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail with `error`
    pub fn fail_with(&self, error: TransportError) {
        *self.failure.write().unwrap() = Some(error);
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        *self.failure.write().unwrap() = None;
    }

    pub fn get_failure(&self) -> Option<TransportError> {
        self.failure.read().unwrap().clone()
    }
}

/// Mock uploader with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockImageUploader {
    behavior: Arc<MockUploadBehavior>,
    history: Arc<Mutex<Vec<LocalImage>>>,
}

impl MockImageUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared behavior for configuration
    pub fn behavior(&self) -> &Arc<MockUploadBehavior> {
        &self.behavior
    }

    /// Images passed to `upload`, in call order
    pub fn recorded_uploads(&self) -> Vec<LocalImage> {
        self.history.lock().unwrap().clone()
    }

    /// URL the mock returns for `image`
    pub fn url_for(image: &LocalImage) -> String {
        format!("{}/{}", MOCK_STORAGE_URL, image.file_name().unwrap_or("image"))
    }
}

#[async_trait::async_trait]
impl ImageUploader for MockImageUploader {
    async fn upload(&self, image: &LocalImage) -> Result<String, TransportError> {
        tracing::info!(path = %image.path().display(), "Mock upload: received image");
        self.history
            .lock()
            .map_err(|e| TransportError::Request(format!("history lock poisoned: {e}")))?
            .push(image.clone());

        if let Some(error) = self.behavior.get_failure() {
            tracing::info!("Mock upload: simulating failure");
            return Err(error);
        }

        Ok(Self::url_for(image))
    }
}
