//! Auth-Service fuer Tempo
//!
//! Registrierung und Login. Der Login liefert ein zustandsloses Token aus
//! dem [`TokenCodec`], es gibt keine Sessions und kein Logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tempo_core::UserId;
use tempo_db::{
    models::{BenutzerRecord, NeuerBenutzer},
    UserRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::PasswortHasher,
    token::TokenCodec,
};

/// Auth-Service – Einstiegspunkt fuer Registrierung und Login
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    hasher: PasswortHasher,
    tokens: Arc<TokenCodec>,
}

impl AuthService {
    pub fn neu(
        user_repo: Arc<dyn UserRepository>,
        hasher: PasswortHasher,
        tokens: Arc<TokenCodec>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    /// Registriert einen neuen Benutzer
    ///
    /// Leere Felder sind `UngueltigeEingabe`, eine bereits registrierte
    /// E-Mail ist `EmailVergeben`.
    pub async fn registrieren(
        &self,
        username: &str,
        email: &str,
        passwort: &str,
    ) -> AuthResult<BenutzerRecord> {
        if username.trim().is_empty() || email.trim().is_empty() || passwort.is_empty() {
            return Err(AuthError::ungueltige_eingabe(
                "Benutzername, E-Mail und Passwort sind Pflichtfelder",
            ));
        }

        let passwort_hash = self.hasher.hashen(passwort)?;

        let benutzer = self
            .user_repo
            .create(NeuerBenutzer {
                username,
                email,
                password_hash: &passwort_hash,
            })
            .await
            .map_err(|e| match e {
                e if e.ist_eindeutigkeit() => AuthError::EmailVergeben(email.to_string()),
                e => AuthError::Datenbank(e),
            })?;

        tracing::info!(
            user_id = %benutzer.id,
            username = %benutzer.username,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und stellt ein Token aus
    ///
    /// Unbekannte E-Mail und falsches Passwort ergeben denselben Fehler,
    /// beide Wege rechnen genau einen Argon2-Hash.
    pub async fn anmelden(
        &self,
        email: &str,
        passwort: &str,
        jetzt: DateTime<Utc>,
    ) -> AuthResult<String> {
        let Some(benutzer) = self.user_repo.get_by_email(email).await? else {
            tracing::warn!(email = %email, "Login mit unbekannter E-Mail");
            self.hasher.blind_verifizieren(passwort);
            return Err(AuthError::UngueltigeAnmeldedaten);
        };

        if !self.hasher.verifizieren(passwort, &benutzer.password_hash)? {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.tokens.ausstellen(benutzer.id, jetzt)?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
        Ok(token)
    }

    /// Laedt den Benutzer hinter einem Principal
    pub async fn benutzer(&self, id: UserId) -> AuthResult<BenutzerRecord> {
        self.user_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AuthError::nicht_gefunden(format!("Benutzer {id}")))
    }
}
