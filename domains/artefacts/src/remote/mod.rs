//! Remote artefact service
//!
//! The Curio API endpoints the cache is fed from:
//! - HTTP client for the real backend
//! - In-memory mock backend for testing and development
//! - Configurable provider, base URL, and request timeout

pub mod client;
pub mod mock;

use curio_common::{Error, Result, TransportError};

use crate::domain::entities::{
    ArtefactChanges, ArtefactRecord, CommentRecord, NewArtefact, NewComment, Notification,
    OwnerProfile,
};

/// Default Curio API base URL
pub const DEFAULT_BASE_URL: &str = "http://curioapp.herokuapp.com/api";

/// Remote service configuration
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Backend provider (http, mock)
    pub provider: String,
    /// Curio API base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Create remote config from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let provider =
            std::env::var("CURIO_BACKEND_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let base_url =
            std::env::var("CURIO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match std::env::var("CURIO_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                Error::Configuration(format!(
                    "CURIO_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            provider,
            base_url,
            timeout_secs,
        })
    }
}

/// Endpoints of the Curio API used by the artefact cache.
#[async_trait::async_trait]
pub trait ArtefactRemote: Send + Sync {
    /// `GET /users/{id}/artefacts`
    async fn list_user_artefacts(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<ArtefactRecord>, TransportError>;

    /// `POST /artefacts`
    async fn create_artefact(
        &self,
        artefact: &NewArtefact,
    ) -> std::result::Result<ArtefactRecord, TransportError>;

    /// `GET /artefacts/{id}`
    async fn get_artefact(
        &self,
        artefact_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError>;

    /// `PUT /artefacts/{id}`
    async fn update_artefact(
        &self,
        artefact_id: &str,
        changes: &ArtefactChanges,
    ) -> std::result::Result<ArtefactRecord, TransportError>;

    /// `DELETE /artefacts/{id}`
    async fn delete_artefact(&self, artefact_id: &str) -> std::result::Result<(), TransportError>;

    /// `POST /artefacts/{id}/likes/{userId}`, returning the updated artefact
    async fn like_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError>;

    /// `DELETE /artefacts/{id}/likes/{userId}`, returning the updated artefact
    async fn unlike_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> std::result::Result<ArtefactRecord, TransportError>;

    /// `GET /artefacts/{id}/comments`
    async fn list_comments(
        &self,
        artefact_id: &str,
    ) -> std::result::Result<Vec<CommentRecord>, TransportError>;

    /// `POST /artefacts/{id}/comments`
    async fn post_comment(
        &self,
        artefact_id: &str,
        comment: &NewComment,
    ) -> std::result::Result<CommentRecord, TransportError>;

    /// `GET /users/{id}`
    async fn get_user(&self, user_id: &str) -> std::result::Result<OwnerProfile, TransportError>;

    /// `GET /users/{id}/notifications`
    async fn list_user_notifications(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<Notification>, TransportError>;
}

/// Factory for creating ArtefactRemote implementations
pub struct RemoteFactory;

impl RemoteFactory {
    pub fn create(config: RemoteConfig) -> Result<Box<dyn ArtefactRemote>> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP artefact remote");
                Ok(Box::new(client::HttpArtefactRemote::new(&config)?))
            }
            "mock" => {
                tracing::info!("Creating mock artefact remote");
                Ok(Box::new(mock::MockArtefactRemote::new()))
            }
            provider => Err(Error::Configuration(format!(
                "Unknown backend provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
