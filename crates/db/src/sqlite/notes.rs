//! SQLite-Implementierung des NotizRepository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use tempo_core::{NoteId, TeilUpdate, UserId};

use crate::error::DbError;
use crate::models::{NeueNotiz, NotizRecord, NotizUpdate};
use crate::repository::{DbResult, NotizRepository};
use crate::sqlite::mutation::zeile_aktualisieren;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::spalten::{jetzt, uuid_lesen, zeit_lesen, zeit_schreiben};

const NOTIZ_SPALTEN: &str = "id, user_id, title, content, created_at, updated_at";

#[async_trait]
impl NotizRepository for SqliteDb {
    async fn create_note(&self, owner: UserId, data: NeueNotiz<'_>) -> DbResult<NotizRecord> {
        let jetzt = zeit_schreiben(&jetzt());

        let row = sqlx::query(
            "INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, user_id, title, content, created_at, updated_at",
        )
        .bind(NoteId::new().inner().to_string())
        .bind(owner.inner().to_string())
        .bind(data.title)
        .bind(data.content)
        .bind(&jetzt)
        .bind(&jetzt)
        .fetch_one(&self.pool)
        .await?;

        row_to_notiz(&row)
    }

    async fn notes_by_owner(&self, owner: UserId) -> DbResult<Vec<NotizRecord>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, content, created_at, updated_at
             FROM notes WHERE user_id = ? ORDER BY updated_at DESC, rowid DESC",
        )
        .bind(owner.inner().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_notiz).collect()
    }

    async fn get_note(&self, id: NoteId) -> DbResult<Option<NotizRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, content, created_at, updated_at
             FROM notes WHERE id = ?",
        )
        .bind(id.inner().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_notiz(&r)).transpose()
    }

    async fn update_note(&self, id: NoteId, data: &NotizUpdate) -> DbResult<NotizRecord> {
        // Leerer Request: unveraendert zurueckgeben, updated_at bleibt stehen
        let Some(mutation) = data.mutation(jetzt()) else {
            return self
                .get_note(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Notiz {id}")));
        };

        let row = zeile_aktualisieren(&self.pool, "notes", NOTIZ_SPALTEN, id.inner(), &mutation)
            .await?
            .ok_or_else(|| DbError::nicht_gefunden(format!("Notiz {id}")))?;
        row_to_notiz(&row)
    }

    async fn delete_note(&self, id: NoteId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id.inner().to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_notiz(row: &SqliteRow) -> DbResult<NotizRecord> {
    use sqlx::Row as _;

    Ok(NotizRecord {
        id: NoteId(uuid_lesen(row, "id")?),
        user_id: UserId(uuid_lesen(row, "user_id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: zeit_lesen(row, "created_at")?,
        updated_at: zeit_lesen(row, "updated_at")?,
    })
}
