//! REST-Handler fuer Registrierung, Login und den eigenen Benutzer

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempo_db::models::BenutzerRecord;

use crate::{extract::JsonBody, ApiResult, ApiState, Principal};

#[derive(Debug, Deserialize)]
pub struct RegistrierenBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/users/register
pub async fn register(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<RegistrierenBody>,
) -> ApiResult<(StatusCode, Json<BenutzerRecord>)> {
    let user = state
        .auth
        .registrieren(&body.username, &body.email, &body.password)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenAntwort {
    pub token: String,
}

/// POST /api/users/login
pub async fn login(
    State(state): State<ApiState>,
    JsonBody(body): JsonBody<LoginBody>,
) -> ApiResult<Json<TokenAntwort>> {
    let token = state
        .auth
        .anmelden(&body.email, &body.password, Utc::now())
        .await?;
    Ok(Json(TokenAntwort { token }))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
) -> ApiResult<Json<BenutzerRecord>> {
    Ok(Json(state.auth.benutzer(user_id).await?))
}
