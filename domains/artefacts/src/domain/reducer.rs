//! Cache update reducer
//!
//! `reduce` is the only way a new `CacheStore` is produced from fetch
//! results. Each event writes one field (or the id list) and nothing else, so
//! events for different artefacts, or for different fields of the same
//! artefact, commute. Two events for the same field resolve last-write-wins.

use super::entities::{ArtefactRecord, CommentRecord, Notification, OwnerProfile};
use super::store::{CacheStore, EntryField};

/// Fetch results and selection changes applied to the cache
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent {
    /// The signed-in user's artefact list was fetched
    ListFetched(Vec<ArtefactRecord>),
    /// A single artefact was fetched or returned by a mutation
    EntryDataFetched(ArtefactRecord),
    /// The full comment list of an artefact was fetched
    CommentsFetched {
        artefact_id: String,
        comments: Vec<CommentRecord>,
    },
    /// The owner profile of an artefact was fetched
    OwnerFetched {
        artefact_id: String,
        owner: OwnerProfile,
    },
    /// The signed-in user's notifications were fetched
    NotificationsFetched(Vec<Notification>),
    ArtefactSelected(String),
    SelectionCleared,
}

impl CacheEvent {
    /// Artefact this event writes to, if it targets a single entry
    pub fn artefact_id(&self) -> Option<&str> {
        match self {
            Self::EntryDataFetched(record) => Some(record.id.as_str()),
            Self::CommentsFetched { artefact_id, .. }
            | Self::OwnerFetched { artefact_id, .. }
            | Self::ArtefactSelected(artefact_id) => Some(artefact_id.as_str()),
            Self::ListFetched(_) | Self::NotificationsFetched(_) | Self::SelectionCleared => None,
        }
    }
}

impl std::fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListFetched(_) => write!(f, "list_fetched"),
            Self::EntryDataFetched(_) => write!(f, "entry_data_fetched"),
            Self::CommentsFetched { .. } => write!(f, "comments_fetched"),
            Self::OwnerFetched { .. } => write!(f, "owner_fetched"),
            Self::NotificationsFetched(_) => write!(f, "notifications_fetched"),
            Self::ArtefactSelected(_) => write!(f, "artefact_selected"),
            Self::SelectionCleared => write!(f, "selection_cleared"),
        }
    }
}

/// Apply `event` to `store`, returning the next store value.
///
/// Panics if the event carries an empty artefact id.
pub fn reduce(store: &CacheStore, event: CacheEvent) -> CacheStore {
    match event {
        CacheEvent::ListFetched(list) => store.merge_artefact_list(list),
        CacheEvent::EntryDataFetched(record) => {
            let artefact_id = record.id.clone();
            store.set_entry_field(&artefact_id, EntryField::Data(record))
        }
        CacheEvent::CommentsFetched {
            artefact_id,
            mut comments,
        } => {
            // Oldest first; stable, so equal timestamps keep server order
            comments.sort_by_key(|comment| comment.posted_at);
            store.set_entry_field(&artefact_id, EntryField::Comments(comments))
        }
        CacheEvent::OwnerFetched { artefact_id, owner } => {
            store.set_entry_field(&artefact_id, EntryField::Owner(owner))
        }
        CacheEvent::NotificationsFetched(notifications) => store.with_notifications(notifications),
        CacheEvent::ArtefactSelected(artefact_id) => store.select(&artefact_id),
        CacheEvent::SelectionCleared => store.clear_selection(),
    }
}
