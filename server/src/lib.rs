//! tempo-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Datenbank, Auth und REST-API.

pub mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use config::ServerConfig;
use tempo_api::{ApiServer, ApiServerKonfig, ApiState};
use tempo_auth::{PasswortHasher, TokenCodec};
use tempo_db::{DatabaseConfig, SqliteDb};

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Token-Codec aus dem Secret bauen
    /// 2. Datenbank oeffnen und migrieren
    /// 3. REST-API starten
    /// 4. Auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        let tokens = Arc::new(
            TokenCodec::neu(&self.config.auth.jwt_secret).context("Token-Codec")?,
        );
        let hasher = PasswortHasher::neu().context("Passwort-Hasher")?;

        let db = SqliteDb::oeffnen(&DatabaseConfig {
            url: self.config.datenbank.url.clone(),
            max_verbindungen: self.config.datenbank.max_verbindungen,
        })
        .await
        .context("Datenbank konnte nicht geoeffnet werden")?;

        let bind_addr: SocketAddr = self
            .config
            .rest_bind_adresse()
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{}'", self.config.rest_bind_adresse()))?;

        let state = ApiState::neu(Arc::new(db), tokens, hasher);
        let server = ApiServer::neu(ApiServerKonfig {
            bind_addr,
            cors_origins: self.config.server.cors_origins.clone(),
        });

        server.starten(state, shutdown_signal()).await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
        Err(e) => tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden"),
    }
}
