//! Verbindungsaufbau zur SQLite-Datenbank

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::DbError;
use crate::repository::DatabaseConfig;

/// Tempo-Datenbank auf SQLite
///
/// Implementiert alle Repository-Traits. Jede Mutation ist ein einzelnes
/// Statement, die Zeilen-Atomaritaet liefert SQLite selbst.
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

impl SqliteDb {
    /// Oeffnet die Datenbank unter `config.url`, legt die Datei bei Bedarf an
    ///
    /// Liefert erst zurueck, wenn das Schema aktuell ist und eine Abfrage
    /// durchgeht. Fremdschluessel sind an, sonst loescht `DELETE` auf einer
    /// Liste ihre Aufgaben nicht mit.
    pub async fn oeffnen(config: &DatabaseConfig) -> Result<Self, DbError> {
        let optionen = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_verbindungen.max(1))
            .connect_with(optionen)
            .await?;

        let db = Self::bereitstellen(pool).await?;
        info!(
            url = %config.url,
            max_verbindungen = config.max_verbindungen,
            "Datenbank bereit"
        );
        Ok(db)
    }

    /// Leere In-Memory-Datenbank mit aktuellem Schema
    pub async fn in_memory() -> Result<Self, DbError> {
        let optionen = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // Jede Verbindung saehe eine eigene leere Datenbank
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(optionen)
            .await?;

        Self::bereitstellen(pool).await
    }

    async fn bereitstellen(pool: SqlitePool) -> Result<Self, DbError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(Self { pool })
    }
}
