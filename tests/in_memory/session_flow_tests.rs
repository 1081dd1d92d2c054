//! Session lifecycle over the file-backed token store.

use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use taskdeck::session::{
    adapters::FileTokenStore,
    domain::{AuthResponse, SessionToken, User},
    ports::TokenStore,
    services::{SessionContext, SessionStatus},
};

fn open_session(dir: &Utf8Path) -> SessionContext {
    let store = FileTokenStore::open(dir).expect("token directory opens");
    SessionContext::new(Arc::new(store))
}

fn token_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(temp.path().join("session")).expect("utf-8 temp path");
    (temp, path)
}

#[test]
fn token_survives_a_restart() {
    let (_temp, dir) = token_dir();
    let first = open_session(&dir);
    first
        .establish(AuthResponse {
            user: User::new("u-1", "Ada", "ada@example.com"),
            token: SessionToken::new("persisted").expect("valid token"),
        })
        .expect("session established");

    let second = open_session(&dir);
    let restored = second.restore().expect("restore should succeed");

    assert!(restored);
    assert_eq!(second.status(), SessionStatus::Authenticated);
    assert_eq!(
        second.token().map(|token| token.expose().to_owned()),
        Some("persisted".to_owned())
    );
}

#[test]
fn expiry_clears_the_persisted_token() {
    let (_temp, dir) = token_dir();
    let session = open_session(&dir);
    session
        .establish(AuthResponse {
            user: User::new("u-1", "Ada", "ada@example.com"),
            token: SessionToken::new("soon-stale").expect("valid token"),
        })
        .expect("session established");

    session.invalidate();

    assert_eq!(session.status(), SessionStatus::Expired);
    let store = FileTokenStore::open(&dir).expect("token directory opens");
    assert!(store.load().expect("store readable").is_none());
    let next_run = open_session(&dir);
    assert!(!next_run.restore().expect("restore should succeed"));
}
