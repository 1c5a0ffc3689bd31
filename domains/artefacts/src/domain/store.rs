//! Normalized artefact cache
//!
//! `CacheStore` keeps one `ArtefactCacheEntry` per artefact id plus the
//! ordered list of the signed-in user's artefact ids. Every write returns a
//! new `CacheStore`; a previously returned value is never changed, so readers
//! may compare snapshots by reference. Entries are shared between snapshots
//! through `Arc` and copied only when written.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::entities::{ArtefactRecord, CommentRecord, Notification, OwnerProfile};

/// Everything cached about a single artefact. Each field is populated
/// independently by its own fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtefactCacheEntry {
    pub data: Option<ArtefactRecord>,
    pub comments: Option<Vec<CommentRecord>>,
    pub owner: Option<OwnerProfile>,
}

/// Population state of an entry's data/comments pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    Empty,
    DataOnly,
    CommentsOnly,
    DataAndComments,
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::DataOnly => write!(f, "data_only"),
            Self::CommentsOnly => write!(f, "comments_only"),
            Self::DataAndComments => write!(f, "data_and_comments"),
        }
    }
}

/// Entry state plus the owner flag, which moves independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryStatus {
    pub state: EntryState,
    pub has_owner: bool,
}

impl ArtefactCacheEntry {
    pub fn status(&self) -> EntryStatus {
        let state = match (self.data.is_some(), self.comments.is_some()) {
            (false, false) => EntryState::Empty,
            (true, false) => EntryState::DataOnly,
            (false, true) => EntryState::CommentsOnly,
            (true, true) => EntryState::DataAndComments,
        };
        EntryStatus {
            state,
            has_owner: self.owner.is_some(),
        }
    }

    /// Data, comments, and owner are all cached
    pub fn is_full(&self) -> bool {
        self.data.is_some() && self.comments.is_some() && self.owner.is_some()
    }
}

/// One field of an entry, with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum EntryField {
    Data(ArtefactRecord),
    Comments(Vec<CommentRecord>),
    Owner(OwnerProfile),
}

impl EntryField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Data(_) => "data",
            Self::Comments(_) => "comments",
            Self::Owner(_) => "owner",
        }
    }
}

/// The currently selected artefact and whatever is cached for it
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedArtefact {
    pub artefact_id: String,
    pub entry: Option<Arc<ArtefactCacheEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStore {
    entries: HashMap<String, Arc<ArtefactCacheEntry>>,
    user_artefact_ids: Vec<String>,
    selection: Option<String>,
    notifications: Vec<Notification>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite `data` for every listed artefact and replace the user's id
    /// list with the incoming order. Comments and owners already cached for
    /// those ids are kept; entries missing from the list stay in the map.
    pub fn merge_artefact_list(&self, list: Vec<ArtefactRecord>) -> Self {
        let mut next = self.clone();
        let mut seen = HashSet::with_capacity(list.len());
        let mut ids = Vec::with_capacity(list.len());

        for record in list {
            let id = record.id.clone();
            next.write_field(&id, EntryField::Data(record));
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }

        next.user_artefact_ids = ids;
        next
    }

    /// Set exactly one field of `artefact_id`'s entry, creating the entry if
    /// needed. Sibling fields and other entries are untouched.
    pub fn set_entry_field(&self, artefact_id: &str, field: EntryField) -> Self {
        let mut next = self.clone();
        next.write_field(artefact_id, field);
        next
    }

    /// Mark `artefact_id` as the selected artefact
    pub fn select(&self, artefact_id: &str) -> Self {
        assert_artefact_id(artefact_id);
        Self {
            selection: Some(artefact_id.to_string()),
            ..self.clone()
        }
    }

    /// Drop the selection; cached entries are kept
    pub fn clear_selection(&self) -> Self {
        Self {
            selection: None,
            ..self.clone()
        }
    }

    /// Replace the signed-in user's notifications
    pub fn with_notifications(&self, notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            ..self.clone()
        }
    }

    fn write_field(&mut self, artefact_id: &str, field: EntryField) {
        assert_artefact_id(artefact_id);
        let entry = Arc::make_mut(self.entries.entry(artefact_id.to_string()).or_default());
        match field {
            EntryField::Data(record) => {
                assert_eq!(
                    record.id, artefact_id,
                    "artefact record written under a different id"
                );
                entry.data = Some(record);
            }
            EntryField::Comments(comments) => entry.comments = Some(comments),
            EntryField::Owner(owner) => entry.owner = Some(owner),
        }
    }

    pub fn entry(&self, artefact_id: &str) -> Option<&Arc<ArtefactCacheEntry>> {
        self.entries.get(artefact_id)
    }

    pub fn user_artefact_ids(&self) -> &[String] {
        &self.user_artefact_ids
    }

    /// The user's artefacts in list order
    pub fn user_artefacts(&self) -> impl Iterator<Item = &ArtefactRecord> {
        self.user_artefact_ids
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter_map(|entry| entry.data.as_ref())
    }

    pub fn selection(&self) -> Option<SelectedArtefact> {
        self.selection.as_ref().map(|id| SelectedArtefact {
            artefact_id: id.clone(),
            entry: self.entries.get(id).cloned(),
        })
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn assert_artefact_id(artefact_id: &str) {
    assert!(
        !artefact_id.trim().is_empty(),
        "artefact id must not be empty"
    );
}
