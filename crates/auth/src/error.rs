//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

use crate::token::TokenFehler;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Authentifizierung ---
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    // --- Token ---
    #[error("Token ungueltig: {0}")]
    Token(#[from] TokenFehler),

    // --- Ressourcen ---
    #[error("Nicht gefunden: {0}")]
    NichtGefunden(String),

    // --- Benutzerverwaltung ---
    #[error("E-Mail bereits registriert: {0}")]
    EmailVergeben(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] tempo_db::DbError),
}

impl AuthError {
    pub fn nicht_gefunden(msg: impl Into<String>) -> Self {
        Self::NichtGefunden(msg.into())
    }

    pub fn ungueltige_eingabe(msg: impl Into<String>) -> Self {
        Self::UngueltigeEingabe(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
