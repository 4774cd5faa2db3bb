//! Auth-Gate: Bearer-Token pruefen und Principal setzen
//!
//! Ablauf pro Request: Header lesen, `Bearer <token>` zerlegen, Token
//! validieren, [`Principal`] als Extension ablegen. Jeder Fehlschlag ergibt
//! dieselbe 401-Antwort, der genaue Grund landet nur im Debug-Log.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tempo_core::UserId;

use crate::error::ApiError;
use crate::state::ApiState;

const NICHT_AUTHENTIFIZIERT: &str = "Nicht authentifiziert";

/// Authentifizierte Identitaet eines Requests (als Extension gespeichert)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal(pub UserId);

/// Extrahiert Bearer-Token aus Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Axum-Middleware fuer alle geschuetzten Routen
pub async fn auth_gate(
    State(state): State<ApiState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(req.headers()) else {
        tracing::debug!(pfad = %req.uri().path(), "Kein Bearer-Token im Request");
        return Err(ApiError::NichtAuthentifiziert(NICHT_AUTHENTIFIZIERT));
    };

    let user_id = state.tokens.validieren(token, Utc::now()).map_err(|grund| {
        tracing::debug!(%grund, "Token abgelehnt");
        ApiError::NichtAuthentifiziert(NICHT_AUTHENTIFIZIERT)
    })?;

    req.extensions_mut().insert(Principal(user_id));
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    /// Fehlt der Principal, haengt die Route nicht hinter dem Auth-Gate
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or_else(|| ApiError::intern("Principal fehlt", parts.uri.path()))
    }
}
