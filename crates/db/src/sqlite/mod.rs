//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod journal;
pub mod notes;
pub mod pool;
pub mod todos;
pub mod users;

mod mutation;
mod spalten;

pub use pool::SqliteDb;
