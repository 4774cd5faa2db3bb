//! SQLite-Implementierung des JournalRepository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use tempo_core::{EntryId, TeilUpdate, UserId};

use crate::error::DbError;
use crate::models::{JournalEintragRecord, JournalUpdate, NeuerJournalEintrag};
use crate::repository::{DbResult, JournalRepository};
use crate::sqlite::mutation::zeile_aktualisieren;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::spalten::{
    datum_lesen, datum_schreiben, jetzt, uuid_lesen, zeit_lesen, zeit_schreiben,
};

const JOURNAL_SPALTEN: &str = "id, user_id, title, content, mood, entry_date, created_at";

#[async_trait]
impl JournalRepository for SqliteDb {
    async fn create_entry(
        &self,
        owner: UserId,
        data: NeuerJournalEintrag<'_>,
    ) -> DbResult<JournalEintragRecord> {
        let row = sqlx::query(
            "INSERT INTO journal_entries (id, user_id, title, content, mood, entry_date, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id, user_id, title, content, mood, entry_date, created_at",
        )
        .bind(EntryId::new().inner().to_string())
        .bind(owner.inner().to_string())
        .bind(data.title)
        .bind(data.content)
        .bind(data.mood)
        .bind(datum_schreiben(&data.entry_date))
        .bind(zeit_schreiben(&jetzt()))
        .fetch_one(&self.pool)
        .await?;

        row_to_eintrag(&row)
    }

    async fn entries_by_owner(&self, owner: UserId) -> DbResult<Vec<JournalEintragRecord>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, content, mood, entry_date, created_at
             FROM journal_entries WHERE user_id = ?
             ORDER BY entry_date DESC, created_at DESC",
        )
        .bind(owner.inner().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_eintrag).collect()
    }

    async fn get_entry(&self, id: EntryId) -> DbResult<Option<JournalEintragRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, content, mood, entry_date, created_at
             FROM journal_entries WHERE id = ?",
        )
        .bind(id.inner().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_eintrag(&r)).transpose()
    }

    async fn update_entry(
        &self,
        id: EntryId,
        data: &JournalUpdate,
    ) -> DbResult<JournalEintragRecord> {
        let Some(mutation) = data.mutation(jetzt()) else {
            return self
                .get_entry(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Journal-Eintrag {id}")));
        };

        let row = zeile_aktualisieren(
            &self.pool,
            "journal_entries",
            JOURNAL_SPALTEN,
            id.inner(),
            &mutation,
        )
        .await?
        .ok_or_else(|| DbError::nicht_gefunden(format!("Journal-Eintrag {id}")))?;
        row_to_eintrag(&row)
    }

    async fn delete_entry(&self, id: EntryId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id.inner().to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_eintrag(row: &SqliteRow) -> DbResult<JournalEintragRecord> {
    use sqlx::Row as _;

    Ok(JournalEintragRecord {
        id: EntryId(uuid_lesen(row, "id")?),
        user_id: UserId(uuid_lesen(row, "user_id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        mood: row.try_get("mood")?,
        entry_date: datum_lesen(row, "entry_date")?,
        created_at: zeit_lesen(row, "created_at")?,
    })
}
