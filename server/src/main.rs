//! Tempo Server – Einstiegspunkt
//!
//! Laedt `.env` und Konfiguration, initialisiert das Logging und startet
//! den Server. Ohne Signatur-Secret oder Datenbank-URL wird kein Socket
//! geoeffnet.

use anyhow::Result;
use tempo_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Fehlende .env ist kein Fehler
    let env_datei = dotenvy::dotenv().ok();

    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("TEMPO_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let mut config = ServerConfig::laden(&config_pfad)?;
    config.umgebung_uebernehmen()?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        env_datei = ?env_datei,
        "Tempo Server wird initialisiert"
    );

    if let Err(e) = config.validieren() {
        tracing::error!(fehler = %e, "Konfiguration unvollstaendig");
        return Err(e);
    }

    Server::neu(config).starten().await
}

/// Initialisiert tracing-subscriber mit dem konfigurierten Level und Format
fn logging_initialisieren(level: &str, format: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}
