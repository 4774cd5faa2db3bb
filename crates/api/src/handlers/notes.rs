//! REST-Handler fuer Notizen

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tempo_core::NoteId;
use tempo_db::models::{NeueNotiz, NotizRecord, NotizUpdate};

use crate::{
    extract::{JsonBody, PfadId},
    handlers::pflichtfeld,
    ApiResult, ApiState, Principal,
};

pub async fn list_notes(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
) -> ApiResult<Json<Vec<NotizRecord>>> {
    Ok(Json(state.notizen.notes_by_owner(user_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct NotizErstellenBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub async fn create_note(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    JsonBody(body): JsonBody<NotizErstellenBody>,
) -> ApiResult<(StatusCode, Json<NotizRecord>)> {
    pflichtfeld(&body.title, "title")?;
    let notiz = state
        .notizen
        .create_note(
            user_id,
            NeueNotiz {
                title: &body.title,
                content: &body.content,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(notiz)))
}

pub async fn get_note(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<NoteId>,
) -> ApiResult<Json<NotizRecord>> {
    Ok(Json(state.guard.notiz_pruefen(id, user_id).await?))
}

pub async fn update_note(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<NoteId>,
    JsonBody(update): JsonBody<NotizUpdate>,
) -> ApiResult<Json<NotizRecord>> {
    state.guard.notiz_pruefen(id, user_id).await?;
    Ok(Json(state.notizen.update_note(id, &update).await?))
}

pub async fn delete_note(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<NoteId>,
) -> ApiResult<StatusCode> {
    state.guard.notiz_pruefen(id, user_id).await?;
    state.notizen.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
