//! tempo-core – Gemeinsame Typen
//!
//! Dieses Crate stellt die Bausteine bereit, die von allen anderen
//! Tempo-Crates gemeinsam genutzt werden:
//! - ID-Newtypes fuer Benutzer und alle benutzereigenen Ressourcen
//! - Den speicherunabhaengigen Builder fuer Teil-Updates

pub mod types;
pub mod update;

// Re-Exporte fuer bequemen Zugriff
pub use types::{EntryId, ItemId, ListId, NoteId, UserId};
pub use update::{FeldWert, Mutation, MutationBuilder, TeilUpdate};
