//! Uebersetzt eine [`Mutation`] in ein einzelnes `UPDATE ... RETURNING`
//!
//! Spaltennamen stammen ausschliesslich aus den `TeilUpdate`-Impls im Code
//! (`&'static str`), Werte werden immer gebunden.

use sqlx::{
    query::Query,
    sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow},
};
use tempo_core::{FeldWert, Mutation};
use uuid::Uuid;

use crate::repository::DbResult;
use crate::sqlite::spalten::{datum_schreiben, zeit_schreiben};

/// `SET`-Klausel in Feldreihenfolge, z.B. `title = ?, updated_at = ?`
fn set_klausel(mutation: &Mutation) -> String {
    mutation
        .spalten()
        .map(|spalte| format!("{spalte} = ?"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn wert_binden<'q>(
    q: Query<'q, Sqlite, SqliteArguments<'q>>,
    wert: &FeldWert,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match wert {
        FeldWert::Text(v) => q.bind(v.clone()),
        FeldWert::Bool(v) => q.bind(*v as i64),
        FeldWert::Ganzzahl(v) => q.bind(*v),
        FeldWert::Datum(v) => q.bind(datum_schreiben(v)),
        FeldWert::Zeitpunkt(v) => q.bind(zeit_schreiben(v)),
    }
}

/// Wendet die Mutation auf die Zeile `id` an
///
/// Gibt die aktualisierte Zeile zurueck, `None` wenn es sie nicht gibt.
pub(crate) async fn zeile_aktualisieren(
    pool: &SqlitePool,
    tabelle: &str,
    rueckgabe_spalten: &str,
    id: Uuid,
    mutation: &Mutation,
) -> DbResult<Option<SqliteRow>> {
    let sql = format!(
        "UPDATE {tabelle} SET {} WHERE id = ? RETURNING {rueckgabe_spalten}",
        set_klausel(mutation)
    );

    let mut q = sqlx::query(&sql);
    for (_, wert) in mutation.felder() {
        q = wert_binden(q, wert);
    }
    let row = q.bind(id.to_string()).fetch_optional(pool).await?;

    tracing::debug!(
        tabelle,
        id = %id,
        felder = mutation.anzahl(),
        gefunden = row.is_some(),
        "Teil-Update ausgefuehrt"
    );
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::MutationBuilder;

    #[test]
    fn set_klausel_folgt_feldreihenfolge() {
        let mutation = MutationBuilder::neu()
            .feld("task", Some("neu"))
            .feld::<bool>("is_completed", None)
            .feld("priority", Some(1i64))
            .bauen()
            .unwrap();
        assert_eq!(set_klausel(&mutation), "task = ?, priority = ?");
    }
}
