//! REST-Handler fuer Journal-Eintraege

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use tempo_core::EntryId;
use tempo_db::models::{eintragsdatum, JournalEintragRecord, JournalUpdate, NeuerJournalEintrag};

use crate::{
    extract::{JsonBody, PfadId},
    handlers::pflichtfeld,
    ApiError, ApiResult, ApiState, Principal,
};

pub async fn list_entries(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
) -> ApiResult<Json<Vec<JournalEintragRecord>>> {
    Ok(Json(state.journal.entries_by_owner(user_id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EintragErstellenBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "eintragsdatum::optional")]
    pub entry_date: Option<NaiveDate>,
}

pub async fn create_entry(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    JsonBody(body): JsonBody<EintragErstellenBody>,
) -> ApiResult<(StatusCode, Json<JournalEintragRecord>)> {
    pflichtfeld(&body.title, "title")?;
    let entry_date = body
        .entry_date
        .ok_or_else(|| ApiError::ungueltige_anfrage("entryDate ist ein Pflichtfeld"))?;

    let eintrag = state
        .journal
        .create_entry(
            user_id,
            NeuerJournalEintrag {
                title: &body.title,
                content: &body.content,
                mood: body.mood.as_deref(),
                entry_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(eintrag)))
}

pub async fn get_entry(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<EntryId>,
) -> ApiResult<Json<JournalEintragRecord>> {
    Ok(Json(state.guard.journal_pruefen(id, user_id).await?))
}

pub async fn update_entry(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<EntryId>,
    JsonBody(update): JsonBody<JournalUpdate>,
) -> ApiResult<Json<JournalEintragRecord>> {
    state.guard.journal_pruefen(id, user_id).await?;
    Ok(Json(state.journal.update_entry(id, &update).await?))
}

pub async fn delete_entry(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<EntryId>,
) -> ApiResult<StatusCode> {
    state.guard.journal_pruefen(id, user_id).await?;
    state.journal.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
