//! Mock Curio API Implementation
//!
//! In-memory backend for testing fetch workflows:
//! - `MockArtefactRemote`: serves seeded artefacts, comments, users, and
//!   notifications, and records every call
//! - `MockRemoteBehavior`: per-operation failures and response delays

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use chrono::Utc;

use super::ArtefactRemote;
use crate::domain::entities::{
    ArtefactChanges, ArtefactRecord, CommentRecord, ImageRef, NewArtefact, NewComment,
    Notification, OwnerProfile,
};
use curio_common::TransportError;

/// Remote operations, used to program failures and inspect call history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    ListUserArtefacts,
    CreateArtefact,
    GetArtefact,
    UpdateArtefact,
    DeleteArtefact,
    Like,
    Unlike,
    ListComments,
    PostComment,
    GetUser,
    ListNotifications,
}

/// A recorded call: the operation and the id it addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub op: RemoteOp,
    pub target: String,
}

/// Programmable behavior for the mock backend
#[derive(Debug, Clone, Default)]
pub struct MockRemoteBehavior {
    pub failures: Arc<RwLock<HashMap<RemoteOp, TransportError>>>,
    pub delays: Arc<RwLock<HashMap<RemoteOp, Duration>>>,
}

impl MockRemoteBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `op` call fail with `error`
    pub fn fail(&self, op: RemoteOp, error: TransportError) {
        self.failures.write().unwrap().insert(op, error);
    }

    /// Hold `op` responses for `delay` before answering
    pub fn delay(&self, op: RemoteOp, delay: Duration) {
        self.delays.write().unwrap().insert(op, delay);
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        self.failures.write().unwrap().clear();
        self.delays.write().unwrap().clear();
    }

    fn failure_for(&self, op: RemoteOp) -> Option<TransportError> {
        self.failures.read().unwrap().get(&op).cloned()
    }

    fn delay_for(&self, op: RemoteOp) -> Option<Duration> {
        self.delays.read().unwrap().get(&op).copied()
    }
}

#[derive(Debug, Default)]
struct MockData {
    /// Insertion order is the order lists are served in
    artefacts: Vec<ArtefactRecord>,
    comments: HashMap<String, Vec<CommentRecord>>,
    users: HashMap<String, OwnerProfile>,
    notifications: HashMap<String, Vec<Notification>>,
}

impl MockData {
    fn artefact_mut(&mut self, artefact_id: &str) -> Result<&mut ArtefactRecord, TransportError> {
        self.artefacts
            .iter_mut()
            .find(|a| a.id == artefact_id)
            .ok_or_else(|| not_found("Artefact", artefact_id))
    }
}

fn not_found(kind: &str, id: &str) -> TransportError {
    TransportError::Status {
        status: 404,
        body: format!("{} {} not found", kind, id),
    }
}

/// In-memory Curio API with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockArtefactRemote {
    behavior: Arc<MockRemoteBehavior>,
    data: Arc<Mutex<MockData>>,
    history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockArtefactRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared behavior for configuration
    pub fn behavior(&self) -> &Arc<MockRemoteBehavior> {
        &self.behavior
    }

    pub fn seed_artefact(&self, artefact: ArtefactRecord) {
        let mut data = self.data.lock().unwrap();
        data.artefacts.retain(|a| a.id != artefact.id);
        data.artefacts.push(artefact);
    }

    pub fn seed_comment(&self, comment: CommentRecord) {
        self.data
            .lock()
            .unwrap()
            .comments
            .entry(comment.artefact_id.clone())
            .or_default()
            .push(comment);
    }

    pub fn seed_user(&self, user: OwnerProfile) {
        self.data.lock().unwrap().users.insert(user.id.clone(), user);
    }

    pub fn seed_notification(&self, notification: Notification) {
        self.data
            .lock()
            .unwrap()
            .notifications
            .entry(notification.user_id.clone())
            .or_default()
            .push(notification);
    }

    /// Server-side state of an artefact
    pub fn artefact(&self, artefact_id: &str) -> Option<ArtefactRecord> {
        self.data
            .lock()
            .unwrap()
            .artefacts
            .iter()
            .find(|a| a.id == artefact_id)
            .cloned()
    }

    /// All calls received, in order
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.history.lock().unwrap().clone()
    }

    /// Operations received, in order
    pub fn recorded_ops(&self) -> Vec<RemoteOp> {
        self.recorded_calls().into_iter().map(|c| c.op).collect()
    }

    pub fn call_count(&self, op: RemoteOp) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.op == op)
            .count()
    }

    /// Clear call history
    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }

    /// Record the call, wait out any programmed delay, then fail if programmed to
    async fn begin(&self, op: RemoteOp, target: &str) -> Result<(), TransportError> {
        tracing::debug!(op = ?op, target = %target, "Mock remote: received call");
        self.history
            .lock()
            .map_err(|e| TransportError::Request(format!("history lock poisoned: {e}")))?
            .push(RecordedCall {
                op,
                target: target.to_string(),
            });

        if let Some(delay) = self.behavior.delay_for(op) {
            tokio::time::sleep(delay).await;
        }

        match self.behavior.failure_for(op) {
            Some(error) => {
                tracing::debug!(op = ?op, "Mock remote: simulating failure");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn data(&self) -> Result<MutexGuard<'_, MockData>, TransportError> {
        self.data
            .lock()
            .map_err(|e| TransportError::Request(format!("data lock poisoned: {e}")))
    }
}

#[async_trait::async_trait]
impl ArtefactRemote for MockArtefactRemote {
    async fn list_user_artefacts(
        &self,
        user_id: &str,
    ) -> Result<Vec<ArtefactRecord>, TransportError> {
        self.begin(RemoteOp::ListUserArtefacts, user_id).await?;
        Ok(self
            .data()?
            .artefacts
            .iter()
            .filter(|a| a.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_artefact(
        &self,
        artefact: &NewArtefact,
    ) -> Result<ArtefactRecord, TransportError> {
        self.begin(RemoteOp::CreateArtefact, &artefact.draft.owner_id)
            .await?;
        let draft = &artefact.draft;
        let record = ArtefactRecord {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: draft.owner_id.clone(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            date_obtained: draft.date_obtained,
            privacy: draft.privacy,
            images: vec![ImageRef::new(artefact.image_url.clone())],
            likes: Default::default(),
            created_at: Utc::now(),
        };
        self.data()?.artefacts.push(record.clone());
        Ok(record)
    }

    async fn get_artefact(&self, artefact_id: &str) -> Result<ArtefactRecord, TransportError> {
        self.begin(RemoteOp::GetArtefact, artefact_id).await?;
        Ok(self.data()?.artefact_mut(artefact_id)?.clone())
    }

    async fn update_artefact(
        &self,
        artefact_id: &str,
        changes: &ArtefactChanges,
    ) -> Result<ArtefactRecord, TransportError> {
        self.begin(RemoteOp::UpdateArtefact, artefact_id).await?;
        let mut data = self.data()?;
        let record = data.artefact_mut(artefact_id)?;
        record.title = changes.title.clone();
        record.description = changes.description.clone();
        record.category = changes.category.clone();
        record.date_obtained = changes.date_obtained;
        record.privacy = changes.privacy;
        record.images = changes.images.clone();
        Ok(record.clone())
    }

    async fn delete_artefact(&self, artefact_id: &str) -> Result<(), TransportError> {
        self.begin(RemoteOp::DeleteArtefact, artefact_id).await?;
        let mut data = self.data()?;
        let before = data.artefacts.len();
        data.artefacts.retain(|a| a.id != artefact_id);
        if data.artefacts.len() == before {
            return Err(not_found("Artefact", artefact_id));
        }
        data.comments.remove(artefact_id);
        Ok(())
    }

    async fn like_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> Result<ArtefactRecord, TransportError> {
        self.begin(RemoteOp::Like, artefact_id).await?;
        let mut data = self.data()?;
        let record = data.artefact_mut(artefact_id)?;
        record.likes.insert(user_id.to_string());
        Ok(record.clone())
    }

    async fn unlike_artefact(
        &self,
        artefact_id: &str,
        user_id: &str,
    ) -> Result<ArtefactRecord, TransportError> {
        self.begin(RemoteOp::Unlike, artefact_id).await?;
        let mut data = self.data()?;
        let record = data.artefact_mut(artefact_id)?;
        record.likes.remove(user_id);
        Ok(record.clone())
    }

    async fn list_comments(&self, artefact_id: &str) -> Result<Vec<CommentRecord>, TransportError> {
        self.begin(RemoteOp::ListComments, artefact_id).await?;
        Ok(self
            .data()?
            .comments
            .get(artefact_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn post_comment(
        &self,
        artefact_id: &str,
        comment: &NewComment,
    ) -> Result<CommentRecord, TransportError> {
        self.begin(RemoteOp::PostComment, artefact_id).await?;
        let mut data = self.data()?;
        data.artefact_mut(artefact_id)?;
        let (author_name, author_pic) = data
            .users
            .get(&comment.author_id)
            .map(|u| (u.name.clone(), u.profile_pic.clone()))
            .unwrap_or_default();
        let record = CommentRecord {
            id: uuid::Uuid::new_v4().to_string(),
            artefact_id: artefact_id.to_string(),
            author_id: comment.author_id.clone(),
            author_name,
            author_pic,
            content: comment.content.clone(),
            posted_at: Utc::now(),
        };
        data.comments
            .entry(artefact_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn get_user(&self, user_id: &str) -> Result<OwnerProfile, TransportError> {
        self.begin(RemoteOp::GetUser, user_id).await?;
        self.data()?
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found("User", user_id))
    }

    async fn list_user_notifications(
        &self,
        user_id: &str,
    ) -> Result<Vec<Notification>, TransportError> {
        self.begin(RemoteOp::ListNotifications, user_id).await?;
        Ok(self
            .data()?
            .notifications
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
