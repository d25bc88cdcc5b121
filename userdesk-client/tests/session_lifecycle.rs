use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;
use tempfile::TempDir;
use userdesk_client::domains::auth::{SessionManager, SessionState};
use userdesk_client::infra::storage::{FileStore, KeyValueStore, MemoryStore};
use userdesk_model::User;

fn mint(claims: serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

fn seeded() -> (SessionManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = SessionManager::new(store.clone());
    session
        .add_user_to_local_cache(&User {
            username: "ann".into(),
            ..User::default()
        })
        .unwrap();
    store.set_item("users", "[]").unwrap();
    (session, store)
}

#[test]
fn saved_token_is_returned_verbatim() {
    let (session, _) = seeded();
    session.save_token("not-even-a-jwt").unwrap();
    assert_eq!(session.token().as_deref(), Some("not-even-a-jwt"));
}

#[test]
fn fresh_token_with_subject_is_logged_in() {
    let (session, _) = seeded();
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    session
        .save_token(&mint(json!({ "sub": "ann", "exp": exp })))
        .unwrap();

    assert!(session.is_user_logged_in());
    assert_eq!(session.logged_in_username().as_deref(), Some("ann"));
}

#[test]
fn log_out_clears_token_user_and_users() {
    let (session, store) = seeded();
    session.save_token("abc").unwrap();

    session.log_out().unwrap();

    assert_eq!(session.token(), None);
    assert_eq!(session.get_user_from_local_cache().unwrap(), None);
    assert_eq!(store.get_item("users").unwrap(), None);
    assert!(store.is_empty());

    // Second logout is a no-op
    session.log_out().unwrap();
}

#[test]
fn token_without_subject_purges_the_session() {
    let (session, store) = seeded();
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    session.save_token(&mint(json!({ "exp": exp }))).unwrap();

    assert!(!session.is_user_logged_in());
    assert_eq!(session.token(), None);
    assert!(store.is_empty());
}

#[test]
fn expired_token_leaves_storage_intact() {
    let (session, store) = seeded();
    let exp = (Utc::now() - Duration::minutes(5)).timestamp();
    let token = mint(json!({ "sub": "ann", "exp": exp }));
    session.save_token(&token).unwrap();

    assert!(!session.is_user_logged_in());
    assert!(matches!(
        session.session_state().unwrap(),
        SessionState::Expired { ref username, .. } if username == "ann"
    ));
    assert_eq!(store.get_item("token").unwrap(), Some(token));
    assert!(session.get_user_from_local_cache().unwrap().is_some());
}

#[test]
fn garbage_token_is_logged_out_but_kept() {
    let (session, store) = seeded();
    session.save_token("definitely.not.jwt").unwrap();

    assert!(!session.is_user_logged_in());
    assert_eq!(
        store.get_item("token").unwrap().as_deref(),
        Some("definitely.not.jwt")
    );
}

#[test]
fn session_survives_a_restart_through_the_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_storage.json");
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = mint(json!({ "sub": "ben", "exp": exp }));

    {
        let session = SessionManager::new(Arc::new(FileStore::new(&path)));
        session.save_token(&token).unwrap();
    }

    let restarted = SessionManager::new(Arc::new(FileStore::new(&path)));
    assert_eq!(restarted.token(), None);
    assert!(restarted.is_user_logged_in());
    assert_eq!(restarted.token().as_deref(), Some(token.as_str()));
    assert_eq!(restarted.logged_in_username().as_deref(), Some("ben"));
}

#[test]
fn corrupted_storage_file_does_not_block_log_out_or_login() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("local_storage.json");
    std::fs::write(&path, r#"{"token": "abc", trailing-garbage"#).unwrap();

    let session = SessionManager::new(Arc::new(FileStore::new(&path)));
    assert!(!session.is_user_logged_in());
    session.log_out().unwrap();

    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let token = mint(json!({ "sub": "ann", "exp": exp }));
    session.save_token(&token).unwrap();
    assert!(session.is_user_logged_in());
}
