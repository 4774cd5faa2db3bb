//! Axum HTTP-Server fuer Tempo

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{routes::router, ApiState};

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct ApiServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

impl Default for ApiServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_origins: vec![],
        }
    }
}

/// CORS: entweder spezifische Origins oder Any
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ungueltiger CORS-Origin ignoriert");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(Any)
}

/// Router samt Trace- und CORS-Layer
pub fn app(state: ApiState, cors_origins: &[String]) -> Router {
    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

/// Axum HTTP-Server fuer die REST-API
pub struct ApiServer {
    konfig: ApiServerKonfig,
}

impl ApiServer {
    pub fn neu(konfig: ApiServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den Server und laeuft bis `shutdown` fertig ist
    pub async fn starten<F>(self, state: ApiState, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = app(state, &self.konfig.cors_origins);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("REST-Server beendet");
        Ok(())
    }
}
