//! Token-Codec: signierte, ablaufende Session-Token
//!
//! Format ist ein JWT (HS256) mit den Claims `sub` (Benutzer-UUID), `iat`
//! und `exp` in Sekunden. `exp_ns` traegt den Nanosekundenanteil des
//! Ablaufs, damit ein Token genau bis `jetzt + TTL` gilt. Der Ablauf wird
//! gegen das vom Aufrufer uebergebene `jetzt` geprueft, nicht gegen die
//! Systemuhr.
//!
//! Vor der Signaturpruefung laeuft [`algorithmus_pruefen`]: Token mit einem
//! anderen Algorithmus im Header werden abgelehnt, auch wenn die
//! Bibliothek sie mit dem Schluessel pruefen koennte.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use tempo_core::UserId;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Gueltigkeitsdauer eines Tokens in Stunden (3 Tage, passend zum Cookie der Web-App)
pub const TOKEN_TTL_STUNDEN: i64 = 72;

/// Gueltigkeitsdauer eines Tokens
pub fn token_ttl() -> Duration {
    Duration::hours(TOKEN_TTL_STUNDEN)
}

const ALGORITHMUS: Algorithm = Algorithm::HS256;

/// Gruende, aus denen ein Token abgelehnt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenFehler {
    #[error("Signatur ungueltig")]
    UngueltigeSignatur,

    #[error("Token abgelaufen")]
    Abgelaufen,

    #[error("Claims ungueltig")]
    UngueltigeClaims,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    /// Nanosekunden nach `exp`, fehlt bei fremd ausgestellten Token
    #[serde(default)]
    exp_ns: u32,
}

impl Claims {
    fn abgelaufen(&self, jetzt: DateTime<Utc>) -> bool {
        (jetzt.timestamp(), jetzt.timestamp_subsec_nanos()) >= (self.exp, self.exp_ns)
    }
}

/// Stellt Token aus und validiert sie mit einem gemeinsamen Secret
///
/// Nach dem Start nur noch lesend benutzt, kann also ohne Lock zwischen
/// Requests geteilt werden.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithmus", &ALGORITHMUS)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Erstellt den Codec, ein leeres Secret ist ein Konfigurationsfehler
    pub fn neu(secret: &str) -> AuthResult<Self> {
        if secret.trim().is_empty() {
            return Err(AuthError::Konfiguration("JWT-Secret ist leer".into()));
        }

        let mut validation = Validation::new(ALGORITHMUS);
        // Ablauf pruefen wir selbst gegen `jetzt`
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Stellt ein Token fuer `user_id` aus, gueltig bis `jetzt + token_ttl()`
    pub fn ausstellen(&self, user_id: UserId, jetzt: DateTime<Utc>) -> AuthResult<String> {
        let ablauf = jetzt + token_ttl();
        let claims = Claims {
            sub: user_id.inner().to_string(),
            iat: jetzt.timestamp(),
            exp: ablauf.timestamp(),
            exp_ns: ablauf.timestamp_subsec_nanos(),
        };

        encode(&Header::new(ALGORITHMUS), &claims, &self.encoding)
            .map_err(|e| AuthError::Konfiguration(format!("Token konnte nicht signiert werden: {e}")))
    }

    /// Prueft Algorithmus, Signatur und Ablauf und liefert die Benutzer-ID
    ///
    /// Gueltig genau dann, wenn `jetzt` vor dem Ablauf liegt, auf die
    /// Nanosekunde genau.
    pub fn validieren(&self, token: &str, jetzt: DateTime<Utc>) -> Result<UserId, TokenFehler> {
        algorithmus_pruefen(token)?;

        let daten = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenFehler::UngueltigeSignatur
                }
                _ => TokenFehler::UngueltigeClaims,
            }
        })?;

        if daten.claims.abgelaufen(jetzt) {
            return Err(TokenFehler::Abgelaufen);
        }

        Uuid::parse_str(&daten.claims.sub)
            .map(UserId)
            .map_err(|_| TokenFehler::UngueltigeClaims)
    }
}

/// Algorithmus-Check auf dem noch ungeprueften Header
///
/// Nur HS256 ist erlaubt. Alles andere (HS512, RS256, ...) gilt als
/// ungueltige Signatur.
pub fn algorithmus_pruefen(token: &str) -> Result<(), TokenFehler> {
    let header = decode_header(token).map_err(|_| TokenFehler::UngueltigeClaims)?;
    if header.alg != ALGORITHMUS {
        tracing::debug!(alg = ?header.alg, "Token mit fremdem Algorithmus abgelehnt");
        return Err(TokenFehler::UngueltigeSignatur);
    }
    Ok(())
}
