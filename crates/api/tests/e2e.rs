//! End-to-End-Tests der REST-API (Router + In-Memory SQLite)

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempo_api::{router, ApiState};
use tempo_auth::{token_ttl, PasswortHasher, TokenCodec};
use tempo_core::UserId;
use tempo_db::SqliteDb;
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    tokens: Arc<TokenCodec>,
}

impl TestApp {
    async fn neu() -> Self {
        let db = Arc::new(SqliteDb::in_memory().await.expect("In-Memory DB"));
        let tokens = Arc::new(TokenCodec::neu("e2e-secret").unwrap());
        let hasher = PasswortHasher::mit_parametern(8 * 1024, 1, 1).unwrap();
        let state = ApiState::neu(db, tokens.clone(), hasher);
        Self {
            router: router(state),
            tokens,
        }
    }

    async fn anfrage(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        self.roh(builder.body(body).unwrap()).await
    }

    async fn roh(&self, req: Request<Body>) -> (StatusCode, Value) {
        let antwort = self.router.clone().oneshot(req).await.unwrap();
        let status = antwort.status();
        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        let wert = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, wert)
    }

    /// Registriert einen Benutzer und meldet ihn an, gibt (id, token) zurueck
    async fn benutzer(&self, name: &str) -> (String, String) {
        let email = format!("{name}@example.com");
        let (status, user) = self
            .anfrage(
                Method::POST,
                "/api/users/register",
                None,
                Some(json!({ "username": name, "email": email, "password": "pw" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, login) = self
            .anfrage(
                Method::POST,
                "/api/users/login",
                None,
                Some(json!({ "email": email, "password": "pw" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        (
            user["id"].as_str().unwrap().to_string(),
            login["token"].as_str().unwrap().to_string(),
        )
    }
}

#[tokio::test]
async fn registrieren_login_und_zugriffsschutz() {
    let app = TestApp::neu().await;
    let (alice_id, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (status, liste) = app
        .anfrage(
            Method::POST,
            "/api/lists",
            Some(&alice),
            Some(json!({ "title": "Einkauf" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(liste["userId"], alice_id.as_str());
    let pfad = format!("/api/lists/{}", liste["id"].as_str().unwrap());

    // Besitzer
    let (status, geladen) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geladen["title"], "Einkauf");
    assert_eq!(geladen["items"], json!([]));

    // Fremder Benutzer sieht nur 404
    let (status, body) = app.anfrage(Method::GET, &pfad, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("title").is_none());

    // Kein Header
    let (status, body) = app.anfrage(Method::GET, &pfad, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    // Abgelaufenes Token
    let alice_uuid = UserId(Uuid::parse_str(&alice_id).unwrap());
    let alt = app
        .tokens
        .ausstellen(alice_uuid, Utc::now() - token_ttl() - Duration::seconds(1))
        .unwrap();
    let (status, _) = app.anfrage(Method::GET, &pfad, Some(&alt), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn falsches_schema_und_kaputtes_token_sind_401() {
    let app = TestApp::neu().await;
    app.benutzer("alice").await;

    let req = Request::builder()
        .uri("/api/lists")
        .header(header::AUTHORIZATION, "Basic YWxpY2U6cHc=")
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.roh(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .anfrage(Method::GET, "/api/lists", Some("kein.gueltiges.token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Token mit fremdem Secret
    let fremd = TokenCodec::neu("anderes-secret")
        .unwrap()
        .ausstellen(UserId::new(), Utc::now())
        .unwrap();
    let (status, _) = app.anfrage(Method::GET, "/api/lists", Some(&fremd), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registrierung_validiert_eingaben() {
    let app = TestApp::neu().await;

    let (status, body) = app
        .anfrage(
            Method::POST,
            "/api/users/register",
            None,
            Some(json!({ "username": "alice", "email": "", "password": "pw" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let neu = json!({ "username": "alice", "email": "alice@example.com", "password": "pw" });
    let (status, user) = app
        .anfrage(Method::POST, "/api/users/register", None, Some(neu.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password").is_none());
    assert_eq!(user["email"], "alice@example.com");

    let (status, _) = app
        .anfrage(Method::POST, "/api/users/register", None, Some(neu))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_verraet_nicht_ob_email_existiert() {
    let app = TestApp::neu().await;
    app.benutzer("alice").await;

    let (status_falsch, body_falsch) = app
        .anfrage(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "falsch" })),
        )
        .await;
    let (status_unbekannt, body_unbekannt) = app
        .anfrage(
            Method::POST,
            "/api/users/login",
            None,
            Some(json!({ "email": "niemand@example.com", "password": "pw" })),
        )
        .await;

    assert_eq!(status_falsch, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unbekannt, StatusCode::UNAUTHORIZED);
    assert_eq!(body_falsch, body_unbekannt);
}

#[tokio::test]
async fn eigener_benutzer() {
    let app = TestApp::neu().await;
    let (id, token) = app.benutzer("alice").await;

    let (status, me) = app.anfrage(Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["username"], "alice");
}

#[tokio::test]
async fn aufgaben_sind_ueber_die_liste_geschuetzt() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (_, liste) = app
        .anfrage(Method::POST, "/api/lists", Some(&alice), Some(json!({ "title": "L" })))
        .await;
    let list_id = liste["id"].as_str().unwrap();

    // Bob kann keine Aufgabe in Alices Liste anlegen
    let (status, _) = app
        .anfrage(
            Method::POST,
            &format!("/api/lists/{list_id}/items"),
            Some(&bob),
            Some(json!({ "task": "fremd" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, item) = app
        .anfrage(
            Method::POST,
            &format!("/api/lists/{list_id}/items"),
            Some(&alice),
            Some(json!({ "task": "Milch", "priority": 2, "dueDate": "2025-01-31T12:00:00Z" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["isCompleted"], false);
    let pfad = format!("/api/items/{}", item["id"].as_str().unwrap());

    // Bob kann sie weder lesen, aendern noch loeschen
    let (status, _) = app.anfrage(Method::GET, &pfad, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .anfrage(Method::PATCH, &pfad, Some(&bob), Some(json!({ "isCompleted": true })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.anfrage(Method::DELETE, &pfad, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Alice: Teil-Update laesst die anderen Felder stehen
    let (status, erledigt) = app
        .anfrage(Method::PATCH, &pfad, Some(&alice), Some(json!({ "isCompleted": true })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(erledigt["isCompleted"], true);
    assert_eq!(erledigt["task"], item["task"]);
    assert_eq!(erledigt["priority"], item["priority"]);
    assert_eq!(erledigt["dueDate"], item["dueDate"]);
    assert_eq!(erledigt["createdAt"], item["createdAt"]);

    let (_, liste) = app
        .anfrage(Method::GET, &format!("/api/lists/{list_id}"), Some(&alice), None)
        .await;
    assert_eq!(liste["items"].as_array().unwrap().len(), 1);

    let (status, _) = app.anfrage(Method::DELETE, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn liste_loeschen_entfernt_aufgaben() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;

    let (_, liste) = app
        .anfrage(Method::POST, "/api/lists", Some(&alice), Some(json!({ "title": "L" })))
        .await;
    let list_pfad = format!("/api/lists/{}", liste["id"].as_str().unwrap());
    let (_, item) = app
        .anfrage(
            Method::POST,
            &format!("{list_pfad}/items"),
            Some(&alice),
            Some(json!({ "task": "x" })),
        )
        .await;

    let (status, body) = app.anfrage(Method::DELETE, &list_pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let item_pfad = format!("/api/items/{}", item["id"].as_str().unwrap());
    let (status, _) = app.anfrage(Method::GET, &item_pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.anfrage(Method::GET, "/api/lists", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn notizen_put_und_leeres_update() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;

    let (status, notiz) = app
        .anfrage(
            Method::POST,
            "/api/notes",
            Some(&alice),
            Some(json!({ "title": "Idee", "content": "Text" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let pfad = format!("/api/notes/{}", notiz["id"].as_str().unwrap());

    // Leeres Update ist ein No-op
    let (status, unveraendert) = app
        .anfrage(Method::PATCH, &pfad, Some(&alice), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unveraendert, notiz);

    // PUT wie PATCH
    let (status, geaendert) = app
        .anfrage(Method::PUT, &pfad, Some(&alice), Some(json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geaendert["title"], "x");
    assert_eq!(geaendert["content"], "Text");
    assert_eq!(geaendert["createdAt"], notiz["createdAt"]);

    let (status, alle) = app.anfrage(Method::GET, "/api/notes", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alle.as_array().unwrap().len(), 1);

    let (status, _) = app
        .anfrage(Method::POST, "/api/notes", Some(&alice), Some(json!({ "title": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn journal_eintraege() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (status, _) = app
        .anfrage(Method::POST, "/api/journal", Some(&alice), Some(json!({ "title": "ohne Datum" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, eintrag) = app
        .anfrage(
            Method::POST,
            "/api/journal",
            Some(&alice),
            Some(json!({
                "title": "Montag",
                "content": "Sonnig",
                "mood": "gut",
                "entryDate": "2024-03-04T18:45:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(eintrag["entryDate"], "2024-03-04");
    assert_eq!(eintrag["mood"], "gut");
    let pfad = format!("/api/journal/{}", eintrag["id"].as_str().unwrap());

    let (status, _) = app.anfrage(Method::GET, &pfad, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, geaendert) = app
        .anfrage(Method::PATCH, &pfad, Some(&alice), Some(json!({ "mood": "muede" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geaendert["mood"], "muede");
    assert_eq!(geaendert["title"], "Montag");
    assert_eq!(geaendert["entryDate"], "2024-03-04");

    let (_, alle_bob) = app.anfrage(Method::GET, "/api/journal", Some(&bob), None).await;
    assert_eq!(alle_bob, json!([]));

    let (status, _) = app.anfrage(Method::DELETE, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ungueltige_id_und_kaputtes_json_sind_400() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;

    let (status, body) = app
        .anfrage(Method::GET, "/api/lists/keine-uuid", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/lists")
        .header(header::AUTHORIZATION, format!("Bearer {alice}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ kaputt"))
        .unwrap();
    let (status, body) = app.roh(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn health_ohne_token() {
    let app = TestApp::neu().await;
    let (status, body) = app.anfrage(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

/// PATCH, PUT und DELETE eines Fremden enden alle in 404 ohne Ressourcendaten
async fn fremde_mutationen_abgewiesen(
    app: &TestApp,
    pfad: &str,
    token: &str,
    aenderung: Value,
) {
    for method in [Method::PATCH, Method::PUT] {
        let (status, body) = app
            .anfrage(method.clone(), pfad, Some(token), Some(aenderung.clone()))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {pfad}");
        assert_eq!(body["code"], 404);
        assert!(body.get("title").is_none());
        assert!(body.get("userId").is_none());
    }

    let (status, body) = app.anfrage(Method::DELETE, pfad, Some(token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {pfad}");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn fremde_liste_bleibt_unveraendert() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (_, liste) = app
        .anfrage(
            Method::POST,
            "/api/lists",
            Some(&alice),
            Some(json!({ "title": "Einkauf" })),
        )
        .await;
    let pfad = format!("/api/lists/{}", liste["id"].as_str().unwrap());

    fremde_mutationen_abgewiesen(&app, &pfad, &bob, json!({ "title": "gekapert" })).await;

    let (status, geladen) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geladen["title"], "Einkauf");

    // Aufgabe in fremder Liste anlegen
    let (status, _) = app
        .anfrage(
            Method::POST,
            &format!("{pfad}/items"),
            Some(&bob),
            Some(json!({ "task": "Milch" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, geladen) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(geladen["items"], json!([]));
}

#[tokio::test]
async fn fremde_notiz_bleibt_unveraendert() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (_, notiz) = app
        .anfrage(
            Method::POST,
            "/api/notes",
            Some(&alice),
            Some(json!({ "title": "Ideen", "content": "privat" })),
        )
        .await;
    let pfad = format!("/api/notes/{}", notiz["id"].as_str().unwrap());

    fremde_mutationen_abgewiesen(
        &app,
        &pfad,
        &bob,
        json!({ "title": "gekapert", "content": "weg" }),
    )
    .await;

    let (status, geladen) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geladen["title"], "Ideen");
    assert_eq!(geladen["content"], "privat");
    assert_eq!(geladen["updatedAt"], notiz["updatedAt"]);
}

#[tokio::test]
async fn fremder_journal_eintrag_bleibt_unveraendert() {
    let app = TestApp::neu().await;
    let (_, alice) = app.benutzer("alice").await;
    let (_, bob) = app.benutzer("bob").await;

    let (_, eintrag) = app
        .anfrage(
            Method::POST,
            "/api/journal",
            Some(&alice),
            Some(json!({
                "title": "Urlaub",
                "content": "Tag eins",
                "entryDate": "2024-05-17",
            })),
        )
        .await;
    let pfad = format!("/api/journal/{}", eintrag["id"].as_str().unwrap());

    fremde_mutationen_abgewiesen(
        &app,
        &pfad,
        &bob,
        json!({ "title": "gekapert", "entryDate": "2000-01-01" }),
    )
    .await;

    let (status, geladen) = app.anfrage(Method::GET, &pfad, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(geladen["title"], "Urlaub");
    assert_eq!(geladen["entryDate"], "2024-05-17");

    let (_, alle) = app.anfrage(Method::GET, "/api/journal", Some(&alice), None).await;
    assert_eq!(alle.as_array().unwrap().len(), 1);
}
