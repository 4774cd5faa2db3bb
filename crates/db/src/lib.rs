//! tempo-db – Resource Store
//!
//! Dieses Crate stellt das Repository-Pattern bereit: die Geschaeftslogik
//! spricht nur mit den Traits aus [`repository`], die konkrete
//! SQLite-Implementierung liegt in [`sqlite`]. Teil-Updates werden aus
//! einer [`tempo_core::Mutation`] in genau ein `UPDATE`-Statement
//! uebersetzt und sind damit pro Zeile atomar.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use repository::{
    DatabaseConfig, DbResult, JournalRepository, NotizRepository, TodoRepository, UserRepository,
};
pub use sqlite::SqliteDb;
