//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen und danach mit
//! Umgebungsvariablen (`JWT_SECRET`, `DB_SOURCE`, `PORT`) ueberschrieben.
//! Fast alle Felder haben Standardwerte. Signatur-Secret und Datenbank-URL
//! haben keine: fehlt eines davon, startet der Server nicht.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP-Einstellungen
    pub server: ServerEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token-Einstellungen
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL, z.B. "sqlite://tempo.db"
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_verbindungen: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Gemeinsames Secret fuer die Token-Signatur (HS256)
    pub jwt_secret: String,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Uebernimmt `JWT_SECRET`, `DB_SOURCE` und `PORT` aus der Umgebung
    pub fn umgebung_uebernehmen(&mut self) -> anyhow::Result<()> {
        self.ueberschreiben(|name| std::env::var(name).ok())
    }

    fn ueberschreiben(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(secret) = var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = var("DB_SOURCE") {
            self.datenbank.url = url;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT ist keine gueltige Portnummer: '{port}'"))?;
        }
        Ok(())
    }

    /// Prueft die Pflichtwerte, ein Fehler hier beendet den Prozess
    pub fn validieren(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("Kein Signatur-Secret konfiguriert ([auth] jwt_secret oder JWT_SECRET)");
        }
        if self.datenbank.url.trim().is_empty() {
            bail!("Keine Datenbank-URL konfiguriert ([datenbank] url oder DB_SOURCE)");
        }
        Ok(())
    }

    /// Gibt die Bind-Adresse fuer den REST-Server zurueck
    pub fn rest_bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }
}
