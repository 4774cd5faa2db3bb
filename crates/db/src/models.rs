//! Datenbankmodelle fuer Tempo
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank. Die JSON-Form
//! nutzt camelCase (`userId`, `createdAt`, ...), so wie die bestehenden
//! Clients sie erwarten. Die `*Update`-Typen sind Teil-Update-Requests:
//! jedes `None`-Feld bleibt in der Datenbank unveraendert.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tempo_core::{EntryId, ItemId, ListId, MutationBuilder, NoteId, TeilUpdate, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
///
/// Der Passwort-Hash wird nie nach aussen serialisiert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenutzerRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// To-do-Listen und Aufgaben
// ---------------------------------------------------------------------------

/// To-do-Liste eines Benutzers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeRecord {
    pub id: ListId,
    pub user_id: UserId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NeueListe<'a> {
    pub title: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeUpdate {
    pub title: Option<String>,
}

impl TeilUpdate for ListeUpdate {
    fn felder(&self) -> MutationBuilder {
        MutationBuilder::neu().feld("title", self.title.clone())
    }
}

/// Aufgabe innerhalb einer Liste
///
/// Hat kein eigenes Besitzerfeld: der Besitzer ist der Besitzer der Liste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AufgabeRecord {
    pub id: ItemId,
    pub list_id: ListId,
    pub task: String,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NeueAufgabe<'a> {
    pub task: &'a str,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AufgabeUpdate {
    pub task: Option<String>,
    pub is_completed: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<i64>,
}

impl TeilUpdate for AufgabeUpdate {
    fn felder(&self) -> MutationBuilder {
        MutationBuilder::neu()
            .feld("task", self.task.clone())
            .feld("is_completed", self.is_completed)
            .feld("due_date", self.due_date)
            .feld("priority", self.priority)
    }
}

/// Antwort fuer `GET /lists/{id}`: die Liste samt ihren Aufgaben
#[derive(Debug, Clone, Serialize)]
pub struct ListeMitAufgaben {
    #[serde(flatten)]
    pub liste: ListeRecord,
    pub items: Vec<AufgabeRecord>,
}

// ---------------------------------------------------------------------------
// Notizen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotizRecord {
    pub id: NoteId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NeueNotiz<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotizUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl TeilUpdate for NotizUpdate {
    const ZEITSTEMPEL_SPALTE: Option<&'static str> = Some("updated_at");

    fn felder(&self) -> MutationBuilder {
        MutationBuilder::neu()
            .feld("title", self.title.clone())
            .feld("content", self.content.clone())
    }
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEintragRecord {
    pub id: EntryId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NeuerJournalEintrag<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub mood: Option<&'a str>,
    pub entry_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "eintragsdatum::optional")]
    pub entry_date: Option<NaiveDate>,
}

/// Eingabeformat fuer `entryDate`
///
/// Akzeptiert `YYYY-MM-DD` oder einen RFC-3339-Zeitpunkt. Vom Zeitpunkt
/// bleibt nur der Tag (UTC) uebrig.
pub mod eintragsdatum {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer};

    pub fn parsen(wert: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(wert, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(wert)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(wert) => parsen(&wert)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("ungueltiges Datum: '{wert}'"))),
        }
    }
}

impl TeilUpdate for JournalUpdate {
    fn felder(&self) -> MutationBuilder {
        MutationBuilder::neu()
            .feld("title", self.title.clone())
            .feld("content", self.content.clone())
            .feld("mood", self.mood.clone())
            .feld("entry_date", self.entry_date)
    }
}
