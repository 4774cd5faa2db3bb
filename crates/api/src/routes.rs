//! Route-Definitionen fuer die REST-API (/api/...)

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{handlers, middleware::auth_gate, ApiState};

/// Routen ohne Token
fn oeffentlich() -> Router<ApiState> {
    Router::new()
        .route("/users/register", post(handlers::users::register))
        .route("/users/login", post(handlers::users::login))
}

/// Routen hinter dem Auth-Gate
///
/// PUT ist ueberall ein Alias fuer PATCH, die Web-App schickt PUT.
fn geschuetzt(state: ApiState) -> Router<ApiState> {
    Router::new()
        // Benutzer
        .route("/users/me", get(handlers::users::me))
        // Listen
        .route(
            "/lists",
            get(handlers::lists::list_lists).post(handlers::lists::create_list),
        )
        .route(
            "/lists/:id",
            get(handlers::lists::get_list)
                .patch(handlers::lists::update_list)
                .put(handlers::lists::update_list)
                .delete(handlers::lists::delete_list),
        )
        .route("/lists/:id/items", post(handlers::lists::create_item))
        // Aufgaben
        .route(
            "/items/:id",
            get(handlers::items::get_item)
                .patch(handlers::items::update_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        // Notizen
        .route(
            "/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/notes/:id",
            get(handlers::notes::get_note)
                .patch(handlers::notes::update_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        // Journal
        .route(
            "/journal",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/journal/:id",
            get(handlers::journal::get_entry)
                .patch(handlers::journal::update_entry)
                .put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        )
        // Gate nur fuer passende Routen, unbekannte Pfade bleiben 404
        .route_layer(middleware::from_fn_with_state(state, auth_gate))
}

/// GET /health – Health-Check-Endpunkt
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Erstellt den vollstaendigen Router ohne aeussere Layer
pub fn router(state: ApiState) -> Router {
    let api = oeffentlich().merge(geschuetzt(state.clone()));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(state)
}
