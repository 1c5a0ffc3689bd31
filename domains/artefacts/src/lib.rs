//! Artefacts domain: client-side artefact cache, remote artefact service, fetch orchestration

pub mod actions;
pub mod domain;
pub mod remote;
pub mod state;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    ArtefactChanges, ArtefactDraft, ArtefactRecord, CommentRecord, ImageRef, NewArtefact,
    NewComment, Notification, OwnerProfile, Privacy,
};
pub use domain::reducer::{reduce, CacheEvent};
pub use domain::store::{
    ArtefactCacheEntry, CacheStore, EntryField, EntryState, EntryStatus, SelectedArtefact,
};

// Re-export remote service types
pub use remote::{ArtefactRemote, RemoteConfig, RemoteFactory};

pub use actions::ArtefactActions;
pub use state::ArtefactStore;
