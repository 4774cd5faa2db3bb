//! SQLite-Implementierung des TodoRepository (Listen + Aufgaben)

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use tempo_core::{ItemId, ListId, TeilUpdate, UserId};

use crate::error::DbError;
use crate::models::{
    AufgabeRecord, AufgabeUpdate, ListeRecord, ListeUpdate, NeueAufgabe, NeueListe,
};
use crate::repository::{DbResult, TodoRepository};
use crate::sqlite::mutation::zeile_aktualisieren;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::spalten::{
    jetzt, optionale_zeit_lesen, uuid_lesen, zeit_lesen, zeit_schreiben,
};

const LISTEN_SPALTEN: &str = "id, user_id, title, created_at";
const AUFGABEN_SPALTEN: &str = "id, list_id, task, is_completed, due_date, priority, created_at";

#[async_trait]
impl TodoRepository for SqliteDb {
    async fn create_list(&self, owner: UserId, data: NeueListe<'_>) -> DbResult<ListeRecord> {
        let row = sqlx::query(
            "INSERT INTO todo_lists (id, user_id, title, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, user_id, title, created_at",
        )
        .bind(ListId::new().inner().to_string())
        .bind(owner.inner().to_string())
        .bind(data.title)
        .bind(zeit_schreiben(&jetzt()))
        .fetch_one(&self.pool)
        .await?;

        row_to_liste(&row)
    }

    async fn lists_by_owner(&self, owner: UserId) -> DbResult<Vec<ListeRecord>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, created_at FROM todo_lists
             WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(owner.inner().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_liste).collect()
    }

    async fn get_list(&self, id: ListId) -> DbResult<Option<ListeRecord>> {
        let row = sqlx::query("SELECT id, user_id, title, created_at FROM todo_lists WHERE id = ?")
            .bind(id.inner().to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_liste(&r)).transpose()
    }

    async fn update_list(&self, id: ListId, data: &ListeUpdate) -> DbResult<ListeRecord> {
        let Some(mutation) = data.mutation(jetzt()) else {
            return self
                .get_list(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Liste {id}")));
        };

        let row = zeile_aktualisieren(&self.pool, "todo_lists", LISTEN_SPALTEN, id.inner(), &mutation)
            .await?
            .ok_or_else(|| DbError::nicht_gefunden(format!("Liste {id}")))?;
        row_to_liste(&row)
    }

    async fn delete_list(&self, id: ListId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM todo_lists WHERE id = ?")
            .bind(id.inner().to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn create_item(
        &self,
        list_id: ListId,
        data: NeueAufgabe<'_>,
    ) -> DbResult<AufgabeRecord> {
        let row = sqlx::query(
            "INSERT INTO todo_items (id, list_id, task, is_completed, due_date, priority, created_at)
             VALUES (?, ?, ?, 0, ?, ?, ?)
             RETURNING id, list_id, task, is_completed, due_date, priority, created_at",
        )
        .bind(ItemId::new().inner().to_string())
        .bind(list_id.inner().to_string())
        .bind(data.task)
        .bind(data.due_date.as_ref().map(zeit_schreiben))
        .bind(data.priority)
        .bind(zeit_schreiben(&jetzt()))
        .fetch_one(&self.pool)
        .await?;

        row_to_aufgabe(&row)
    }

    async fn items_by_list(&self, list_id: ListId) -> DbResult<Vec<AufgabeRecord>> {
        let rows = sqlx::query(
            "SELECT id, list_id, task, is_completed, due_date, priority, created_at
             FROM todo_items WHERE list_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(list_id.inner().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_aufgabe).collect()
    }

    async fn get_item(&self, id: ItemId) -> DbResult<Option<AufgabeRecord>> {
        let row = sqlx::query(
            "SELECT id, list_id, task, is_completed, due_date, priority, created_at
             FROM todo_items WHERE id = ?",
        )
        .bind(id.inner().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_aufgabe(&r)).transpose()
    }

    async fn item_owner(&self, id: ItemId) -> DbResult<Option<UserId>> {
        let row = sqlx::query(
            "SELECT l.user_id AS user_id
             FROM todo_items i
             JOIN todo_lists l ON l.id = i.list_id
             WHERE i.id = ?",
        )
        .bind(id.inner().to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| uuid_lesen(&r, "user_id").map(UserId))
            .transpose()
    }

    async fn update_item(&self, id: ItemId, data: &AufgabeUpdate) -> DbResult<AufgabeRecord> {
        let Some(mutation) = data.mutation(jetzt()) else {
            return self
                .get_item(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Aufgabe {id}")));
        };

        let row = zeile_aktualisieren(
            &self.pool,
            "todo_items",
            AUFGABEN_SPALTEN,
            id.inner(),
            &mutation,
        )
        .await?
        .ok_or_else(|| DbError::nicht_gefunden(format!("Aufgabe {id}")))?;
        row_to_aufgabe(&row)
    }

    async fn delete_item(&self, id: ItemId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM todo_items WHERE id = ?")
            .bind(id.inner().to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_liste(row: &SqliteRow) -> DbResult<ListeRecord> {
    use sqlx::Row as _;

    Ok(ListeRecord {
        id: ListId(uuid_lesen(row, "id")?),
        user_id: UserId(uuid_lesen(row, "user_id")?),
        title: row.try_get("title")?,
        created_at: zeit_lesen(row, "created_at")?,
    })
}

fn row_to_aufgabe(row: &SqliteRow) -> DbResult<AufgabeRecord> {
    use sqlx::Row as _;

    let is_completed: i64 = row.try_get("is_completed")?;

    Ok(AufgabeRecord {
        id: ItemId(uuid_lesen(row, "id")?),
        list_id: ListId(uuid_lesen(row, "list_id")?),
        task: row.try_get("task")?,
        is_completed: is_completed != 0,
        due_date: optionale_zeit_lesen(row, "due_date")?,
        priority: row.try_get("priority")?,
        created_at: zeit_lesen(row, "created_at")?,
    })
}
