//! Artefact fetch orchestration
//!
//! One async method per user-facing operation. Each issues its remote calls
//! strictly in sequence, turns the results into cache events, and resolves
//! with the server payload or fails with the first error encountered. A
//! failed call never produces a cache event; steps that already succeeded are
//! not rolled back.

use std::sync::Arc;

use curio_common::{Error, Result};
use curio_upload::{ImageUploader, LocalImage};
use validator::Validate;

use crate::domain::entities::{
    ArtefactChanges, ArtefactDraft, ArtefactRecord, CommentRecord, NewArtefact, NewComment,
    Notification, OwnerProfile,
};
use crate::domain::reducer::CacheEvent;
use crate::domain::store::{ArtefactCacheEntry, CacheStore, SelectedArtefact};
use crate::remote::ArtefactRemote;
use crate::state::ArtefactStore;

/// Artefact operations exposed to the UI layer
#[derive(Clone)]
pub struct ArtefactActions {
    remote: Arc<dyn ArtefactRemote>,
    uploader: Arc<dyn ImageUploader>,
    store: ArtefactStore,
    current_user_id: String,
}

impl ArtefactActions {
    /// `current_user_id` is the signed-in user, whose list and notifications
    /// are refreshed after edits and deletions.
    pub fn new(
        remote: Arc<dyn ArtefactRemote>,
        uploader: Arc<dyn ImageUploader>,
        store: ArtefactStore,
        current_user_id: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            uploader,
            store,
            current_user_id: current_user_id.into(),
        }
    }

    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }

    pub fn store(&self) -> &ArtefactStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<CacheStore> {
        self.store.snapshot()
    }

    pub fn entry(&self, artefact_id: &str) -> Option<Arc<ArtefactCacheEntry>> {
        self.store.entry(artefact_id)
    }

    pub fn user_artefact_ids(&self) -> Vec<String> {
        self.store.user_artefact_ids()
    }

    pub fn selection(&self) -> Option<SelectedArtefact> {
        self.store.selection()
    }

    /// Fetch every artefact posted by `user_id` and make it the cached list.
    pub async fn fetch_user_artefacts(&self, user_id: &str) -> Result<Vec<ArtefactRecord>> {
        let artefacts = self
            .remote
            .list_user_artefacts(user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to get user artefacts")
            })?;

        self.store.dispatch(CacheEvent::ListFetched(artefacts.clone()));
        tracing::info!(user_id = %user_id, count = artefacts.len(), "User artefacts refreshed");
        Ok(artefacts)
    }

    /// Fetch a single artefact into its cache entry.
    pub async fn fetch_artefact(&self, artefact_id: &str) -> Result<ArtefactRecord> {
        let artefact = self
            .remote
            .get_artefact(artefact_id)
            .await
            .inspect_err(|e| {
                tracing::error!(artefact_id = %artefact_id, error = %e, "Failed to get artefact")
            })?;

        self.store.dispatch(CacheEvent::EntryDataFetched(artefact.clone()));
        Ok(artefact)
    }

    /// Refresh an artefact and mark it as the selected one.
    pub async fn select_artefact(&self, artefact_id: &str) -> Result<ArtefactRecord> {
        let artefact = self.fetch_artefact(artefact_id).await?;
        self.store.dispatch(CacheEvent::ArtefactSelected(artefact.id.clone()));
        Ok(artefact)
    }

    /// Forget the selected artefact. Cached entries are kept.
    pub fn clear_selection(&self) {
        self.store.dispatch(CacheEvent::SelectionCleared);
    }

    /// Upload the photo, create the artefact, then refresh the owner's list.
    ///
    /// Nothing is sent to the API if the draft is invalid or the upload fails.
    pub async fn create_artefact(
        &self,
        draft: ArtefactDraft,
        image: LocalImage,
    ) -> Result<ArtefactRecord> {
        draft
            .validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        let image_url = self.uploader.upload(&image).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to upload image for new artefact")
        })?;

        let owner_id = draft.owner_id.clone();
        let created = self
            .remote
            .create_artefact(&NewArtefact { draft, image_url })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create new artefact"))?;

        tracing::info!(artefact_id = %created.id, "Artefact created");
        self.fetch_user_artefacts(&owner_id).await?;
        Ok(created)
    }

    /// Save edits to `artefact`, uploading `new_image` if one was picked and
    /// otherwise keeping the current image URL, then refresh the user's list.
    pub async fn edit_artefact(
        &self,
        artefact: ArtefactRecord,
        new_image: Option<LocalImage>,
    ) -> Result<ArtefactRecord> {
        ArtefactDraft::from(&artefact)
            .validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        let image_url = match new_image {
            Some(image) => self.uploader.upload(&image).await.inspect_err(|e| {
                tracing::error!(
                    artefact_id = %artefact.id,
                    error = %e,
                    "Failed to upload replacement image"
                )
            })?,
            None => artefact
                .primary_image_url()
                .map(str::to_owned)
                .ok_or_else(|| {
                    Error::Validation(format!("Artefact {} has no image to keep", artefact.id))
                })?,
        };

        let changes = ArtefactChanges::from_record(&artefact, image_url);
        let updated = self
            .remote
            .update_artefact(&artefact.id, &changes)
            .await
            .inspect_err(|e| {
                tracing::error!(artefact_id = %artefact.id, error = %e, "Failed to update artefact")
            })?;

        tracing::info!(artefact_id = %updated.id, "Artefact updated");
        self.fetch_user_artefacts(&self.current_user_id).await?;
        Ok(updated)
    }

    /// Delete an artefact, then refresh the user's list and notifications.
    ///
    /// If a refresh fails after the delete went through, the cache is left
    /// as it was and the refresh error is returned.
    pub async fn delete_artefact(&self, artefact_id: &str) -> Result<()> {
        self.remote
            .delete_artefact(artefact_id)
            .await
            .inspect_err(|e| {
                tracing::error!(artefact_id = %artefact_id, error = %e, "Failed to delete artefact")
            })?;

        tracing::info!(artefact_id = %artefact_id, "Artefact deleted");
        self.fetch_user_artefacts(&self.current_user_id).await?;
        self.fetch_user_notifications(&self.current_user_id).await?;
        Ok(())
    }

    /// Like an artefact; the server's updated record replaces the cached one.
    pub async fn like_artefact(&self, artefact_id: &str, user_id: &str) -> Result<ArtefactRecord> {
        let artefact = self
            .remote
            .like_artefact(artefact_id, user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    artefact_id = %artefact_id,
                    error = %e,
                    "Failed to like an artefact"
                )
            })?;

        self.store.dispatch(CacheEvent::EntryDataFetched(artefact.clone()));
        Ok(artefact)
    }

    /// Remove a like; the server's updated record replaces the cached one.
    pub async fn unlike_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> Result<ArtefactRecord> {
        let artefact = self
            .remote
            .unlike_artefact(artefact_id, user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    artefact_id = %artefact_id,
                    error = %e,
                    "Failed to unlike an artefact"
                )
            })?;

        self.store.dispatch(CacheEvent::EntryDataFetched(artefact.clone()));
        Ok(artefact)
    }

    /// Fetch the owner's profile and cache it on the artefact's entry.
    pub async fn fetch_artefact_owner(
        &self,
        artefact_id: &str,
        owner_id: &str,
    ) -> Result<OwnerProfile> {
        let owner = self.remote.get_user(owner_id).await.inspect_err(|e| {
            tracing::error!(
                artefact_id = %artefact_id,
                owner_id = %owner_id,
                error = %e,
                "Failed to get artefact owner"
            )
        })?;

        self.store.dispatch(CacheEvent::OwnerFetched {
            artefact_id: artefact_id.to_string(),
            owner: owner.clone(),
        });
        Ok(owner)
    }

    /// Fetch all comments on an artefact, oldest first, replacing the cached list.
    pub async fn fetch_comments(&self, artefact_id: &str) -> Result<Vec<CommentRecord>> {
        let mut comments = self
            .remote
            .list_comments(artefact_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    artefact_id = %artefact_id,
                    error = %e,
                    "Failed to get artefact comments"
                )
            })?;
        comments.sort_by_key(|comment| comment.posted_at);

        self.store.dispatch(CacheEvent::CommentsFetched {
            artefact_id: artefact_id.to_string(),
            comments: comments.clone(),
        });
        Ok(comments)
    }

    /// Post a comment, then re-fetch the artefact's full comment list.
    pub async fn post_comment(
        &self,
        artefact_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<CommentRecord> {
        let comment = NewComment {
            author_id: user_id.to_string(),
            content: content.to_string(),
        };
        comment
            .validate()
            .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

        let posted = self
            .remote
            .post_comment(artefact_id, &comment)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    artefact_id = %artefact_id,
                    error = %e,
                    "Failed to create new comment"
                )
            })?;

        self.fetch_comments(artefact_id).await?;
        Ok(posted)
    }

    /// Fetch the notifications addressed to `user_id`.
    pub async fn fetch_user_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let notifications = self
            .remote
            .list_user_notifications(user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Failed to get user notifications")
            })?;

        self.store.dispatch(CacheEvent::NotificationsFetched(notifications.clone()));
        Ok(notifications)
    }
}
