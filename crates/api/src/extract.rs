//! Extraktoren mit einheitlichen 400-Antworten
//!
//! Die Standard-Extraktoren von axum antworten mit Klartext. Diese Wrapper
//! liefern stattdessen den JSON-Fehler-Body aus [`ApiError`].

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// JSON-Body, kaputtes JSON ergibt 400
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(wert) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(grund = %e.body_text(), "JSON-Body abgelehnt");
            ApiError::ungueltige_anfrage("Ungueltiger Request-Body")
        })?;
        Ok(Self(wert))
    }
}

/// Typisierte ID aus dem Pfad, keine UUID ergibt 400
pub struct PfadId<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PfadId<T>
where
    T: From<Uuid> + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(grund = %e.body_text(), "Pfad-ID abgelehnt");
                ApiError::ungueltige_anfrage("Ungueltige ID")
            })?;
        Ok(Self(T::from(id)))
    }
}
