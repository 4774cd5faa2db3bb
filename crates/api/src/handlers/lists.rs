//! REST-Handler fuer To-do-Listen

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tempo_core::ListId;
use tempo_db::models::{
    AufgabeRecord, ListeMitAufgaben, ListeRecord, ListeUpdate, NeueAufgabe, NeueListe,
};

use crate::{
    extract::{JsonBody, PfadId},
    handlers::pflichtfeld,
    ApiResult, ApiState, Principal,
};

/// GET /api/lists
pub async fn list_lists(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
) -> ApiResult<Json<Vec<ListeRecord>>> {
    Ok(Json(state.todos.lists_by_owner(user_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListeErstellenBody {
    #[serde(default)]
    pub title: String,
}

/// POST /api/lists
pub async fn create_list(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    JsonBody(body): JsonBody<ListeErstellenBody>,
) -> ApiResult<(StatusCode, Json<ListeRecord>)> {
    pflichtfeld(&body.title, "title")?;
    let liste = state
        .todos
        .create_list(user_id, NeueListe { title: &body.title })
        .await?;
    tracing::debug!(list_id = %liste.id, user_id = %user_id, "Liste erstellt");
    Ok((StatusCode::CREATED, Json(liste)))
}

/// GET /api/lists/:id – Liste samt Aufgaben
pub async fn get_list(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ListId>,
) -> ApiResult<Json<ListeMitAufgaben>> {
    let liste = state.guard.liste_pruefen(id, user_id).await?;
    let items = state.todos.items_by_list(liste.id).await?;
    Ok(Json(ListeMitAufgaben { liste, items }))
}

/// PATCH/PUT /api/lists/:id
pub async fn update_list(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ListId>,
    JsonBody(update): JsonBody<ListeUpdate>,
) -> ApiResult<Json<ListeRecord>> {
    state.guard.liste_pruefen(id, user_id).await?;
    Ok(Json(state.todos.update_list(id, &update).await?))
}

/// DELETE /api/lists/:id – loescht auch alle Aufgaben der Liste
pub async fn delete_list(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(id): PfadId<ListId>,
) -> ApiResult<StatusCode> {
    state.guard.liste_pruefen(id, user_id).await?;
    state.todos.delete_list(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AufgabeErstellenBody {
    #[serde(default)]
    pub task: String,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: i64,
}

/// POST /api/lists/:id/items
pub async fn create_item(
    State(state): State<ApiState>,
    Principal(user_id): Principal,
    PfadId(list_id): PfadId<ListId>,
    JsonBody(body): JsonBody<AufgabeErstellenBody>,
) -> ApiResult<(StatusCode, Json<AufgabeRecord>)> {
    state.guard.liste_pruefen(list_id, user_id).await?;
    pflichtfeld(&body.task, "task")?;

    let item = state
        .todos
        .create_item(
            list_id,
            NeueAufgabe {
                task: &body.task,
                due_date: body.due_date,
                priority: body.priority,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}
