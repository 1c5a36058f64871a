//! Session persistence through the JSON file store.

use std::sync::Arc;

use assert_matches::assert_matches;
use tofula_client::{FileStore, Session, SessionError, SessionStore, Slot};
use tofula_core::studio::DEMO_STUDIO_PASSWORD;

fn session_in(dir: &std::path::Path) -> Session {
    Session::new(Arc::new(FileStore::in_dir(dir).unwrap()))
}

#[test]
fn token_and_studio_flag_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let session = session_in(dir.path());
    session.sign_in("tok-persisted").unwrap();
    session
        .studio_login(DEMO_STUDIO_PASSWORD, DEMO_STUDIO_PASSWORD)
        .unwrap();
    drop(session);

    let reopened = session_in(dir.path());
    assert_eq!(reopened.token().as_deref(), Some("tok-persisted"));
    assert!(reopened.studio_granted());
}

#[test]
fn sign_out_is_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let session = session_in(dir.path());
    session.sign_in("tok").unwrap();
    session.sign_out().unwrap();

    assert_eq!(session_in(dir.path()).token(), None);
}

#[test]
fn expired_session_is_persisted() {
    let dir = tempfile::tempdir().unwrap();

    let session = session_in(dir.path());
    session.sign_in("tok").unwrap();
    session.expire();

    assert!(!session_in(dir.path()).is_signed_in());
}

#[test]
fn store_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");

    let store = FileStore::in_dir(&nested).unwrap();
    assert!(!store.path().exists());
    store.set(Slot::Token, "tok").unwrap();

    assert!(store.path().exists());
    let raw = std::fs::read_to_string(store.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["auth_token"], "tok");
}

#[test]
fn empty_file_opens_as_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "  \n").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get(Slot::Token), None);
}

#[test]
fn corrupt_file_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    assert_matches!(FileStore::open(&path), Err(SessionError::Format(_)));
}
