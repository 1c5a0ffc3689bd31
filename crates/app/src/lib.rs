//! Curio client composition root
//!
//! Wires the configured remote backend and image uploader into the artefact
//! actions shared by every screen.

use std::sync::Arc;

use curio_artefacts::{ArtefactActions, ArtefactStore, RemoteConfig, RemoteFactory};
use curio_common::Config;
use curio_upload::{ImageUploaderFactory, UploadConfig};

/// Create the artefact actions from environment configuration
pub fn create_actions(config: &Config) -> Result<ArtefactActions, anyhow::Error> {
    let remote_config = RemoteConfig::from_env()?;
    let upload_config = UploadConfig::from_env()?;
    build_actions(config, remote_config, upload_config)
}

/// Create the artefact actions from explicit provider configuration
pub fn build_actions(
    config: &Config,
    remote_config: RemoteConfig,
    upload_config: UploadConfig,
) -> Result<ArtefactActions, anyhow::Error> {
    let remote = RemoteFactory::create(remote_config)?;
    let uploader = ImageUploaderFactory::create(upload_config)?;

    Ok(ArtefactActions::new(
        Arc::from(remote),
        Arc::from(uploader),
        ArtefactStore::new(),
        config.user_id.clone(),
    ))
}
