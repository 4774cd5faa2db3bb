//! Teil-Updates ("nur gesetzte Felder aendern")
//!
//! Ein Update-Request besteht aus optionalen Feldern. Jedes vorhandene Feld
//! ueberschreibt den gespeicherten Wert, jedes fehlende Feld bleibt
//! unveraendert. Dieses Modul uebersetzt so einen Request in eine
//! [`Mutation`]: eine geordnete Liste von (Spaltenname, neuer Wert)-Paaren,
//! unabhaengig vom Speicher-Backend. Das Backend muss eine Mutation atomar
//! auf genau eine Zeile anwenden.
//!
//! Ist kein Feld gesetzt, liefert [`MutationBuilder::bauen`] `None`. Der
//! Aufrufer gibt dann die unveraenderte Ressource zurueck (kein Fehler).

use chrono::{DateTime, NaiveDate, Utc};

/// Neuer Wert eines einzelnen Feldes
#[derive(Debug, Clone, PartialEq)]
pub enum FeldWert {
    Text(String),
    Bool(bool),
    Ganzzahl(i64),
    Datum(NaiveDate),
    Zeitpunkt(DateTime<Utc>),
}

impl From<String> for FeldWert {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for FeldWert {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for FeldWert {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FeldWert {
    fn from(v: i64) -> Self {
        Self::Ganzzahl(v)
    }
}

impl From<NaiveDate> for FeldWert {
    fn from(v: NaiveDate) -> Self {
        Self::Datum(v)
    }
}

impl From<DateTime<Utc>> for FeldWert {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Zeitpunkt(v)
    }
}

/// Geordnete, nicht-leere Liste von Feldaenderungen fuer genau eine Zeile
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    felder: Vec<(&'static str, FeldWert)>,
}

impl Mutation {
    /// Alle Feldaenderungen in fester Reihenfolge
    pub fn felder(&self) -> &[(&'static str, FeldWert)] {
        &self.felder
    }

    /// Nur die Spaltennamen, in derselben Reihenfolge wie [`Mutation::felder`]
    pub fn spalten(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.felder.iter().map(|(name, _)| *name)
    }

    /// Gibt den neuen Wert einer Spalte zurueck, falls die Mutation sie setzt
    pub fn wert(&self, spalte: &str) -> Option<&FeldWert> {
        self.felder
            .iter()
            .find(|(name, _)| *name == spalte)
            .map(|(_, wert)| wert)
    }

    /// Anzahl gesetzter Spalten, mindestens 1
    pub fn anzahl(&self) -> usize {
        self.felder.len()
    }
}

/// Baut eine [`Mutation`] aus optionalen Feldern
#[derive(Debug, Clone, Default)]
pub struct MutationBuilder {
    felder: Vec<(&'static str, FeldWert)>,
    zeitstempel: Option<(&'static str, DateTime<Utc>)>,
}

impl MutationBuilder {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Nimmt das Feld nur auf, wenn ein neuer Wert vorhanden ist
    pub fn feld<T: Into<FeldWert>>(mut self, spalte: &'static str, wert: Option<T>) -> Self {
        if let Some(wert) = wert {
            self.felder.push((spalte, wert.into()));
        }
        self
    }

    /// Setzt eine implizite "zuletzt geaendert"-Spalte
    ///
    /// Wird nur angehaengt wenn mindestens ein echtes Feld gesetzt ist.
    pub fn zeitstempel(mut self, spalte: &'static str, jetzt: DateTime<Utc>) -> Self {
        self.zeitstempel = Some((spalte, jetzt));
        self
    }

    /// Gibt `None` zurueck wenn kein Feld gesetzt ist (No-op-Update)
    pub fn bauen(self) -> Option<Mutation> {
        if self.felder.is_empty() {
            return None;
        }
        let mut felder = self.felder;
        if let Some((spalte, jetzt)) = self.zeitstempel {
            felder.push((spalte, FeldWert::Zeitpunkt(jetzt)));
        }
        Some(Mutation { felder })
    }
}

/// Ein Update-Request, der sich als Teil-Update ausdruecken laesst
pub trait TeilUpdate {
    /// Spalte die bei jeder echten Aenderung auf "jetzt" gesetzt wird
    const ZEITSTEMPEL_SPALTE: Option<&'static str> = None;

    /// Alle optionalen Felder in fester Reihenfolge
    fn felder(&self) -> MutationBuilder;

    /// Uebersetzt den Request in eine Mutation, `None` bei leerem Request
    fn mutation(&self, jetzt: DateTime<Utc>) -> Option<Mutation> {
        let builder = self.felder();
        match Self::ZEITSTEMPEL_SPALTE {
            Some(spalte) => builder.zeitstempel(spalte, jetzt).bauen(),
            None => builder.bauen(),
        }
    }
}
