//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die Traits sind objektsicher (`async_trait`),
//! damit der HTTP-Layer sie als `Arc<dyn ...>` im State halten kann.
//!
//! Lesezugriffe per ID sind bewusst nicht nach Besitzer gefiltert: die
//! Besitzpruefung passiert im Ownership-Guard, der dafuer die Besitzer-ID
//! aus dem geladenen Datensatz braucht. Sammel-Abfragen (`*_by_owner`) sind
//! dagegen immer auf einen Besitzer beschraenkt.

use async_trait::async_trait;
use tempo_core::{EntryId, ItemId, ListId, NoteId, UserId};

use crate::error::DbError;
use crate::models::{
    AufgabeRecord, AufgabeUpdate, BenutzerRecord, JournalEintragRecord, JournalUpdate,
    ListeRecord, ListeUpdate, NeueAufgabe, NeueListe, NeueNotiz, NeuerBenutzer,
    NeuerJournalEintrag, NotizRecord, NotizUpdate,
};

pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx-URL, z.B. "sqlite://tempo.db"
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
}

/// Repository fuer Benutzer
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Legt einen Benutzer an, `DbError::Eindeutigkeit` bei doppelter E-Mail
    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    async fn get_by_id(&self, id: UserId) -> DbResult<Option<BenutzerRecord>>;

    async fn get_by_email(&self, email: &str) -> DbResult<Option<BenutzerRecord>>;
}

/// Repository fuer To-do-Listen und ihre Aufgaben
///
/// Alle `update_*`-Methoden sind Teil-Updates: nur gesetzte Felder werden
/// geschrieben, ein leerer Request liefert den unveraenderten Datensatz.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create_list(&self, owner: UserId, data: NeueListe<'_>) -> DbResult<ListeRecord>;

    /// Alle Listen eines Benutzers, neueste zuerst
    async fn lists_by_owner(&self, owner: UserId) -> DbResult<Vec<ListeRecord>>;

    async fn get_list(&self, id: ListId) -> DbResult<Option<ListeRecord>>;

    async fn update_list(&self, id: ListId, data: &ListeUpdate) -> DbResult<ListeRecord>;

    /// Loescht die Liste samt ihren Aufgaben
    async fn delete_list(&self, id: ListId) -> DbResult<bool>;

    async fn create_item(&self, list_id: ListId, data: NeueAufgabe<'_>)
        -> DbResult<AufgabeRecord>;

    /// Alle Aufgaben einer Liste in Erstellungsreihenfolge
    async fn items_by_list(&self, list_id: ListId) -> DbResult<Vec<AufgabeRecord>>;

    async fn get_item(&self, id: ItemId) -> DbResult<Option<AufgabeRecord>>;

    /// Besitzer einer Aufgabe, ermittelt ueber Aufgabe -> Liste -> Benutzer
    async fn item_owner(&self, id: ItemId) -> DbResult<Option<UserId>>;

    async fn update_item(&self, id: ItemId, data: &AufgabeUpdate) -> DbResult<AufgabeRecord>;

    async fn delete_item(&self, id: ItemId) -> DbResult<bool>;
}

/// Repository fuer Notizen
#[async_trait]
pub trait NotizRepository: Send + Sync {
    async fn create_note(&self, owner: UserId, data: NeueNotiz<'_>) -> DbResult<NotizRecord>;

    /// Alle Notizen eines Benutzers, zuletzt geaenderte zuerst
    async fn notes_by_owner(&self, owner: UserId) -> DbResult<Vec<NotizRecord>>;

    async fn get_note(&self, id: NoteId) -> DbResult<Option<NotizRecord>>;

    /// Setzt `updated_at`, sobald mindestens ein Feld geaendert wird
    async fn update_note(&self, id: NoteId, data: &NotizUpdate) -> DbResult<NotizRecord>;

    async fn delete_note(&self, id: NoteId) -> DbResult<bool>;
}

/// Repository fuer Journal-Eintraege
#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn create_entry(
        &self,
        owner: UserId,
        data: NeuerJournalEintrag<'_>,
    ) -> DbResult<JournalEintragRecord>;

    /// Alle Eintraege eines Benutzers, juengstes Datum zuerst
    async fn entries_by_owner(&self, owner: UserId) -> DbResult<Vec<JournalEintragRecord>>;

    async fn get_entry(&self, id: EntryId) -> DbResult<Option<JournalEintragRecord>>;

    async fn update_entry(
        &self,
        id: EntryId,
        data: &JournalUpdate,
    ) -> DbResult<JournalEintragRecord>;

    async fn delete_entry(&self, id: EntryId) -> DbResult<bool>;
}
