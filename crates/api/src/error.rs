//! Fehlertypen der REST-Schnittstelle
//!
//! Antwort-Body ist immer `{"code": <status>, "message": "..."}`. Interne
//! Fehlertexte (SQL, Hashing, ...) werden nur geloggt, nie ausgeliefert.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tempo_auth::AuthError;
use tempo_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ungueltige Anfrage: {0}")]
    UngueltigeAnfrage(String),

    #[error("Nicht authentifiziert: {0}")]
    NichtAuthentifiziert(&'static str),

    #[error("Nicht gefunden")]
    NichtGefunden,

    #[error("Konflikt: {0}")]
    Konflikt(String),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn ungueltige_anfrage(msg: impl Into<String>) -> Self {
        Self::UngueltigeAnfrage(msg.into())
    }

    /// Protokolliert den Grund und liefert einen generischen 500er
    pub fn intern(kontext: &str, fehler: impl std::fmt::Display) -> Self {
        tracing::error!(kontext, fehler = %fehler, "Interner Fehler");
        Self::Intern(kontext.to_string())
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::UngueltigeAnfrage(_) => StatusCode::BAD_REQUEST,
            Self::NichtAuthentifiziert(_) => StatusCode::UNAUTHORIZED,
            Self::NichtGefunden => StatusCode::NOT_FOUND,
            Self::Konflikt(_) => StatusCode::CONFLICT,
            Self::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn nachricht(&self) -> String {
        match self {
            Self::UngueltigeAnfrage(msg) | Self::Konflikt(msg) => msg.clone(),
            Self::NichtAuthentifiziert(msg) => (*msg).to_string(),
            Self::NichtGefunden => "Nicht gefunden".to_string(),
            Self::Intern(_) => "Interner Serverfehler".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        (
            status,
            Json(json!({
                "code": status.as_u16(),
                "message": self.nachricht(),
            })),
        )
            .into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NichtGefunden(_) => Self::NichtGefunden,
            e if e.ist_eindeutigkeit() => Self::Konflikt("Eintrag existiert bereits".into()),
            e => Self::intern("Datenbankzugriff fehlgeschlagen", e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::UngueltigeEingabe(msg) => Self::UngueltigeAnfrage(msg),
            AuthError::UngueltigeAnmeldedaten => {
                Self::NichtAuthentifiziert("E-Mail oder Passwort falsch")
            }
            AuthError::Token(_) => Self::NichtAuthentifiziert("Ungueltiger oder abgelaufener Token"),
            AuthError::NichtGefunden(_) => Self::NichtGefunden,
            AuthError::EmailVergeben(_) => Self::Konflikt("E-Mail bereits registriert".into()),
            AuthError::Datenbank(e) => e.into(),
            e @ (AuthError::PasswortHashing(_) | AuthError::Konfiguration(_)) => {
                Self::intern("Auth-Service", e)
            }
        }
    }
}
