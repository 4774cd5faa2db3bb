//! Lese- und Schreibhilfen fuer Spaltenwerte
//!
//! UUIDs liegen als TEXT, Zeitpunkte als RFC-3339 mit fester
//! Mikrosekunden-Praezision (damit die Sortierung per String stimmt),
//! Kalenderdaten als `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use sqlx::{sqlite::SqliteRow, Row as _};
use uuid::Uuid;

use crate::error::DbError;
use crate::repository::DbResult;

const DATUM_FORMAT: &str = "%Y-%m-%d";

/// Aktueller Zeitpunkt, auf die gespeicherte Praezision gekuerzt
pub(crate) fn jetzt() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn zeit_schreiben(zeit: &DateTime<Utc>) -> String {
    zeit.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn datum_schreiben(datum: &NaiveDate) -> String {
    datum.format(DATUM_FORMAT).to_string()
}

pub(crate) fn uuid_lesen(row: &SqliteRow, spalte: &str) -> DbResult<Uuid> {
    let wert: String = row.try_get(spalte)?;
    Uuid::parse_str(&wert).map_err(|e| {
        DbError::ungueltige_daten(format!("Ungueltige UUID in '{spalte}': '{wert}': {e}"))
    })
}

fn zeit_parsen(spalte: &str, wert: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(wert)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            DbError::ungueltige_daten(format!("Ungueltiger Zeitpunkt in '{spalte}': '{wert}': {e}"))
        })
}

pub(crate) fn zeit_lesen(row: &SqliteRow, spalte: &str) -> DbResult<DateTime<Utc>> {
    let wert: String = row.try_get(spalte)?;
    zeit_parsen(spalte, &wert)
}

pub(crate) fn optionale_zeit_lesen(
    row: &SqliteRow,
    spalte: &str,
) -> DbResult<Option<DateTime<Utc>>> {
    let wert: Option<String> = row.try_get(spalte)?;
    wert.as_deref().map(|w| zeit_parsen(spalte, w)).transpose()
}

pub(crate) fn datum_lesen(row: &SqliteRow, spalte: &str) -> DbResult<NaiveDate> {
    let wert: String = row.try_get(spalte)?;
    NaiveDate::parse_from_str(&wert, DATUM_FORMAT).map_err(|e| {
        DbError::ungueltige_daten(format!("Ungueltiges Datum in '{spalte}': '{wert}': {e}"))
    })
}
