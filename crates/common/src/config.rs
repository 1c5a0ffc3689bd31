//! Configuration management following 12-factor app principles
//!
//! Application-level settings are loaded from environment variables. Each
//! remote collaborator (API backend, image upload) reads its own settings
//! next to its implementation.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Signed-in user whose artefacts and notifications are cached
    pub user_id: String,

    /// Runtime configuration
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let user_id =
            env::var("CURIO_USER_ID").map_err(|_| anyhow::anyhow!("CURIO_USER_ID is required"))?;
        if user_id.trim().is_empty() {
            return Err(anyhow::anyhow!("CURIO_USER_ID must not be empty"));
        }

        let config = Self {
            user_id,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "curio=debug".to_string()),
        };

        tracing::debug!(user_id = %config.user_id, "Configuration loaded");
        Ok(config)
    }
}
