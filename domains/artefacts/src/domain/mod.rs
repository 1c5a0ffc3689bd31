//! Artefact cache domain: entities, normalized store, and reducer

pub mod entities;
pub mod reducer;
pub mod store;
