use std::sync::Arc;

use super::*;
use crate::session::backend::FileBackend;
use crate::session::backend::test_support::MemoryBackend;

fn sample_user() -> User {
    User { id: 7, username: "ana".to_string(), email: "ana@example.test".to_string() }
}

fn memory_store() -> (Arc<MemoryBackend>, SessionStore) {
    let backend = Arc::new(MemoryBackend::new());
    let store = SessionStore::new(Arc::clone(&backend) as Arc<dyn SessionBackend>);
    (backend, store)
}

// =============================================================
// Round trip
// =============================================================

#[tokio::test]
async fn save_then_load_returns_the_pair() {
    let (_, store) = memory_store();

    store.save("abc123", &sample_user()).await.expect("save");
    let (token, user) = store.load().await.expect("session present");
    assert_eq!(token, "abc123");
    assert_eq!(user, sample_user());
}

#[tokio::test]
async fn load_before_any_save_is_absent() {
    let (_, store) = memory_store();
    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn clear_removes_both_keys() {
    let (backend, store) = memory_store();

    store.save("abc123", &sample_user()).await.expect("save");
    store.clear().await.expect("clear");

    assert!(store.load().await.is_none());
    assert!(!backend.contains(TOKEN_KEY));
    assert!(!backend.contains(USER_KEY));
}

#[tokio::test]
async fn file_backend_round_trips_across_store_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    let store = SessionStore::new(Arc::new(FileBackend::new(dir.path())));
    store.save("abc123", &sample_user()).await.expect("save");

    // Fresh store over the same directory, as after a process relaunch.
    let relaunched = SessionStore::new(Arc::new(FileBackend::new(dir.path())));
    let (token, user) = relaunched.load().await.expect("session present");
    assert_eq!(token, "abc123");
    assert_eq!(user, sample_user());
}

// =============================================================
// Degraded entries
// =============================================================

#[tokio::test]
async fn token_without_user_is_absent() {
    let (backend, store) = memory_store();
    backend.seed(TOKEN_KEY, "abc123");

    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn user_without_token_is_absent() {
    let (backend, store) = memory_store();
    backend.seed(USER_KEY, r#"{"id": 7, "username": "ana", "email": "ana@example.test"}"#);

    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn unparsable_user_record_is_absent() {
    let (backend, store) = memory_store();
    backend.seed(TOKEN_KEY, "abc123");
    backend.seed(USER_KEY, "{not json");

    assert!(store.load().await.is_none());
}

#[tokio::test]
async fn unreadable_backend_degrades_to_absent() {
    let (backend, store) = memory_store();
    store.save("abc123", &sample_user()).await.expect("save");

    backend.fail_reads();
    assert!(store.load().await.is_none());
}
