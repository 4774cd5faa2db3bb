//! REST-Handler fuer einzelne Aufgaben
//!
//! Der Besitz wird jedes Mal ueber die Liste der Aufgabe ermittelt.

use axum::{extract::State, http::StatusCode, Json};
use tempo_core::ItemId;
use tempo_db::models::{AufgabeRecord, AufgabeUpdate};

use crate::{
    extract::{JsonBody, PfadId},
    ApiResult, ApiState, Principal,
};

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ItemId>,
) -> ApiResult<Json<AufgabeRecord>> {
    Ok(Json(state.guard.aufgabe_pruefen(id, user_id).await?))
}

/// PATCH/PUT /api/items/:id
pub async fn update_item(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ItemId>,
    JsonBody(update): JsonBody<AufgabeUpdate>,
) -> ApiResult<Json<AufgabeRecord>> {
    state.guard.aufgabe_pruefen(id, user_id).await?;
    Ok(Json(state.todos.update_item(id, &update).await?))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ItemId>,
) -> ApiResult<StatusCode> {
    state.guard.aufgabe_pruefen(id, user_id).await?;
    state.todos.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
