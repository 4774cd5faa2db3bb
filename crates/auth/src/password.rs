//! Passwort-Hashing mit Argon2id
//!
//! Der Hash ist ein PHC-String (Algorithmus, Parameter und Salt stecken im
//! String). Die Verifikation liest die Parameter aus dem gespeicherten
//! Hash, aeltere Hashes bleiben also gueltig wenn sich die Kosten aendern.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Hasher mit festen Kostenparametern
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
    /// Hash mit denselben Kosten, fuer Logins ohne Konto
    attrappe: String,
}

/// Fester Salt der Attrappe ("tempoblindverify")
const ATTRAPPE_SALT: &str = "dGVtcG9ibGluZHZlcmlmeQ";

impl PasswortHasher {
    /// Standard-Parameter (OWASP, Stand 2024):
    /// - Speicher: 64 MiB
    /// - Iterationen: 3
    /// - Parallelismus: 1
    pub fn neu() -> AuthResult<Self> {
        Self::mit_parametern(64 * 1024, 3, 1)
    }

    /// Eigene Kosten, z.B. guenstige Parameter in Tests
    pub fn mit_parametern(m_cost: u32, t_cost: u32, p_cost: u32) -> AuthResult<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;

        let salt = SaltString::from_b64(ATTRAPPE_SALT)
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))?;
        let attrappe = argon2_mit(&params)
            .hash_password(b"", &salt)
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))?
            .to_string();

        Ok(Self { params, attrappe })
    }

    fn argon2(&self) -> Argon2<'static> {
        argon2_mit(&self.params)
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// `Ok(false)` bei falschem Passwort, `Err` nur bei kaputtem Hash.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

        match self.argon2().verify_password(passwort.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
        }
    }

    /// Verifiziert gegen die Attrappe und verwirft das Ergebnis
    ///
    /// Kostet so viel wie [`PasswortHasher::verifizieren`], damit ein Login
    /// mit unbekannter E-Mail nicht schneller antwortet.
    pub fn blind_verifizieren(&self, passwort: &str) {
        if let Err(e) = self.verifizieren(passwort, &self.attrappe) {
            tracing::error!(fehler = %e, "Attrappen-Hash nicht pruefbar");
        }
    }
}

fn argon2_mit(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}
