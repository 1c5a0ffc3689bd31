// Curio - Local Development Runner

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use curio_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curio=debug"));
    if std::env::var("CURIO_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }

    info!("Starting Curio local development runner");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let actions = curio_app::create_actions(&config).map_err(|e| {
        error!("Failed to create artefact actions: {}", e);
        e
    })?;

    let artefacts = actions.fetch_user_artefacts(&config.user_id).await?;
    info!(count = artefacts.len(), "Fetched artefacts for {}", config.user_id);

    for artefact in &artefacts {
        if let Err(e) = actions.fetch_comments(&artefact.id).await {
            warn!(artefact_id = %artefact.id, "Skipping comments: {}", e);
        }
        if let Err(e) = actions
            .fetch_artefact_owner(&artefact.id, &artefact.owner_id)
            .await
        {
            warn!(artefact_id = %artefact.id, "Skipping owner: {}", e);
        }

        if let Some(entry) = actions.entry(&artefact.id) {
            let status = entry.status();
            info!(
                artefact_id = %artefact.id,
                title = %artefact.title,
                privacy = %artefact.privacy,
                likes = artefact.like_count(),
                comments = entry.comments.as_ref().map_or(0, Vec::len),
                state = %status.state,
                has_owner = status.has_owner,
                "Artefact cached"
            );
        }
    }

    let notifications = actions.fetch_user_notifications(&config.user_id).await?;
    let unseen = notifications.iter().filter(|n| !n.seen).count();
    info!(
        total = notifications.len(),
        unseen, "Fetched notifications for {}", config.user_id
    );

    info!(entries = actions.snapshot().len(), "Local run complete");
    Ok(())
}
