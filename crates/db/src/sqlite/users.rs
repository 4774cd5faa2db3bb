//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use tempo_core::UserId;

use crate::error::{ist_unique_violation, DbError};
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::spalten::{jetzt, uuid_lesen, zeit_lesen, zeit_schreiben};

#[async_trait]
impl UserRepository for SqliteDb {
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let id = UserId::new();

        let row = sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(id.inner().to_string())
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(zeit_schreiben(&jetzt()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_violation(&e) {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits registriert", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        row_to_benutzer(&row)
    }

    async fn get_by_id(&self, id: UserId) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE id = ?",
        )
        .bind(id.inner().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_benutzer(&r)).transpose()
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    use sqlx::Row as _;

    Ok(BenutzerRecord {
        id: UserId(uuid_lesen(row, "id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: zeit_lesen(row, "created_at")?,
    })
}
