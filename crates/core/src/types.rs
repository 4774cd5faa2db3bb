//! Gemeinsame Identifikationstypen fuer Tempo
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! verschiedenen ID-Arten zur Compilezeit auszuschliessen. Eine `ItemId`
//! kann so nie versehentlich als `ListId` an den Store gereicht werden.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_typ {
    ($(#[$doc:meta])* $name:ident, $praefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Erstellt eine neue zufaellige ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Gibt die innere UUID zurueck
            pub fn inner(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($praefix, ":{}"), self.0)
            }
        }
    };
}

id_typ!(
    /// Eindeutige Benutzer-ID
    UserId,
    "user"
);
id_typ!(
    /// Eindeutige ID einer To-do-Liste
    ListId,
    "list"
);
id_typ!(
    /// Eindeutige ID eines To-do-Eintrags
    ItemId,
    "item"
);
id_typ!(
    /// Eindeutige Notiz-ID
    NoteId,
    "note"
);
id_typ!(
    /// Eindeutige ID eines Journal-Eintrags
    EntryId,
    "entry"
);
