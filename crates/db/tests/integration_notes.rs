//! Integration-Tests fuer NotizRepository

use std::time::Duration;

use tempo_core::{NoteId, UserId};
use tempo_db::{
    models::{NeueNotiz, NeuerBenutzer, NotizUpdate},
    DbError, NotizRepository, SqliteDb, UserRepository,
};

async fn db_mit_benutzer() -> (SqliteDb, UserId) {
    let db = SqliteDb::in_memory().await.unwrap();
    let user = db
        .create(NeuerBenutzer {
            username: "alice",
            email: "alice@example.com",
            password_hash: "hash",
        })
        .await
        .unwrap();
    (db, user.id)
}

#[tokio::test]
async fn notiz_erstellen_und_laden() {
    let (db, owner) = db_mit_benutzer().await;

    let notiz = db
        .create_note(
            owner,
            NeueNotiz {
                title: "Idee",
                content: "Text",
            },
        )
        .await
        .unwrap();
    assert_eq!(notiz.created_at, notiz.updated_at);

    let geladen = db.get_note(notiz.id).await.unwrap().unwrap();
    assert_eq!(geladen, notiz);
    assert!(db.get_note(NoteId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_setzt_updated_at_nur_bei_aenderung() {
    let (db, owner) = db_mit_benutzer().await;
    let notiz = db
        .create_note(
            owner,
            NeueNotiz {
                title: "Idee",
                content: "Text",
            },
        )
        .await
        .unwrap();

    let unveraendert = db.update_note(notiz.id, &NotizUpdate::default()).await.unwrap();
    assert_eq!(unveraendert, notiz);

    tokio::time::sleep(Duration::from_millis(5)).await;

    let geaendert = db
        .update_note(
            notiz.id,
            &NotizUpdate {
                content: Some("Neuer Text".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(geaendert.title, "Idee");
    assert_eq!(geaendert.content, "Neuer Text");
    assert_eq!(geaendert.created_at, notiz.created_at);
    assert!(geaendert.updated_at > notiz.updated_at);
}

#[tokio::test]
async fn zuletzt_geaenderte_zuerst() {
    let (db, owner) = db_mit_benutzer().await;
    let alt = db
        .create_note(owner, NeueNotiz { title: "alt", content: "" })
        .await
        .unwrap();
    let neu = db
        .create_note(owner, NeueNotiz { title: "neu", content: "" })
        .await
        .unwrap();

    let ids: Vec<_> = db.notes_by_owner(owner).await.unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![neu.id, alt.id]);

    tokio::time::sleep(Duration::from_millis(5)).await;
    db.update_note(
        alt.id,
        &NotizUpdate {
            title: Some("wieder aktuell".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let ids: Vec<_> = db.notes_by_owner(owner).await.unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![alt.id, neu.id]);
}

#[tokio::test]
async fn notiz_loeschen() {
    let (db, owner) = db_mit_benutzer().await;
    let notiz = db
        .create_note(owner, NeueNotiz { title: "weg", content: "" })
        .await
        .unwrap();

    assert!(db.delete_note(notiz.id).await.unwrap());
    assert!(!db.delete_note(notiz.id).await.unwrap());

    let ergebnis = db.update_note(notiz.id, &NotizUpdate::default()).await;
    assert!(matches!(ergebnis, Err(DbError::NichtGefunden(_))));
}
