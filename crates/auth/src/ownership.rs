//! Besitzpruefung pro Ressourcenart
//!
//! Jede Leseanfrage auf eine einzelne Ressource und jede Aenderung laeuft
//! vorher durch den Guard. Ein fremder Datensatz wird genauso gemeldet wie
//! ein fehlender (`NichtGefunden`), damit sich die Existenz fremder IDs
//! nicht abfragen laesst.
//!
//! Aufgaben haben kein eigenes Besitzerfeld. Ihr Besitzer wird bei jeder
//! Pruefung ueber Aufgabe -> Liste -> Benutzer neu ermittelt. Es wird nichts
//! zwischen Requests gecacht.

use std::sync::Arc;

use tempo_core::{EntryId, ItemId, ListId, NoteId, UserId};
use tempo_db::{
    models::{AufgabeRecord, JournalEintragRecord, ListeRecord, NotizRecord},
    JournalRepository, NotizRepository, TodoRepository,
};

use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct OwnershipGuard {
    todos: Arc<dyn TodoRepository>,
    notizen: Arc<dyn NotizRepository>,
    journal: Arc<dyn JournalRepository>,
}

/// Fehlend und fremd sind nach aussen dasselbe
fn verweigert(art: &str, id: impl std::fmt::Display, principal: UserId) -> AuthError {
    tracing::debug!(ressource = %id, principal = %principal, "{art} gehoert nicht dem Principal");
    AuthError::nicht_gefunden(format!("{art} {id}"))
}

impl OwnershipGuard {
    pub fn neu(
        todos: Arc<dyn TodoRepository>,
        notizen: Arc<dyn NotizRepository>,
        journal: Arc<dyn JournalRepository>,
    ) -> Self {
        Self {
            todos,
            notizen,
            journal,
        }
    }

    /// Laedt eine Liste, wenn sie `principal` gehoert
    pub async fn liste_pruefen(&self, id: ListId, principal: UserId) -> AuthResult<ListeRecord> {
        match self.todos.get_list(id).await? {
            Some(liste) if liste.user_id == principal => Ok(liste),
            Some(_) => Err(verweigert("Liste", id, principal)),
            None => Err(AuthError::nicht_gefunden(format!("Liste {id}"))),
        }
    }

    /// Laedt eine Aufgabe, wenn ihre Liste `principal` gehoert
    pub async fn aufgabe_pruefen(&self, id: ItemId, principal: UserId) -> AuthResult<AufgabeRecord> {
        match self.todos.item_owner(id).await? {
            Some(owner) if owner == principal => {}
            Some(_) => return Err(verweigert("Aufgabe", id, principal)),
            None => return Err(AuthError::nicht_gefunden(format!("Aufgabe {id}"))),
        }

        // Zwischen beiden Abfragen kann die Aufgabe geloescht worden sein
        self.todos
            .get_item(id)
            .await?
            .ok_or_else(|| AuthError::nicht_gefunden(format!("Aufgabe {id}")))
    }

    pub async fn notiz_pruefen(&self, id: NoteId, principal: UserId) -> AuthResult<NotizRecord> {
        match self.notizen.get_note(id).await? {
            Some(notiz) if notiz.user_id == principal => Ok(notiz),
            Some(_) => Err(verweigert("Notiz", id, principal)),
            None => Err(AuthError::nicht_gefunden(format!("Notiz {id}"))),
        }
    }

    pub async fn journal_pruefen(
        &self,
        id: EntryId,
        principal: UserId,
    ) -> AuthResult<JournalEintragRecord> {
        match self.journal.get_entry(id).await? {
            Some(eintrag) if eintrag.user_id == principal => Ok(eintrag),
            Some(_) => Err(verweigert("Journal-Eintrag", id, principal)),
            None => Err(AuthError::nicht_gefunden(format!("Journal-Eintrag {id}"))),
        }
    }
}
