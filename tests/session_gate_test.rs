use std::sync::Arc;
use whatsflow_board::api::{ApiError, MockApi, SessionValidationResponse};
use whatsflow_board::model::Session;
use whatsflow_board::session_gate::{AuthError, SessionGate};
use whatsflow_board::storage::{KeyValueStore, MemoryStore, SESSION_STORAGE_KEY};

fn stored_session() -> Session {
    Session {
        token: "tok-1".to_string(),
        user_id: "u-cached".to_string(),
        client_id: "c-cached".to_string(),
        user_name: Some("Cached Name".to_string()),
        user_email: Some("cached@example.com".to_string()),
        client_name: Some("Cached Lda".to_string()),
    }
}

fn gate_with(store: Arc<MemoryStore>, api: Arc<MockApi>) -> SessionGate {
    SessionGate::new(api as _, store as _)
}

fn seed_store(store: &MemoryStore, session: &Session) {
    store
        .put(SESSION_STORAGE_KEY, &serde_json::to_string(session).unwrap())
        .unwrap();
}

#[tokio::test]
async fn missing_session_fails_without_calling_the_server() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));

    let err = gate.initialize().await.expect_err("must fail closed");
    assert!(matches!(err, AuthError::MissingSession));
    assert_eq!(api.validate_calls(), 0);
}

#[tokio::test]
async fn malformed_or_incomplete_blob_counts_as_missing() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    store.put(SESSION_STORAGE_KEY, "{ not json").unwrap();

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    let err = gate.initialize().await.expect_err("must fail closed");
    assert!(matches!(err, AuthError::MissingSession));

    // Parses, but the client id is missing.
    store
        .put(
            SESSION_STORAGE_KEY,
            r#"{"sessionToken":"tok","userId":"u1","clientId":""}"#,
        )
        .unwrap();
    let err = gate.initialize().await.expect_err("must fail closed");
    assert!(matches!(err, AuthError::MissingSession));
    assert_eq!(api.validate_calls(), 0);
}

#[tokio::test]
async fn server_rejection_clears_the_stored_session() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &stored_session());
    api.push_validation(Ok(SessionValidationResponse {
        valid: Some(false),
        error: Some("Sessão expirada".to_string()),
        ..SessionValidationResponse::default()
    }));

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    let err = gate.initialize().await.expect_err("must fail closed");
    match err {
        AuthError::Rejected(message) => assert_eq!(message, "Sessão expirada"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn valid_flag_without_identity_is_a_rejection() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &stored_session());
    api.push_validation(Ok(SessionValidationResponse {
        valid: Some(true),
        user_id: Some("u1".to_string()),
        // client_id missing entirely
        ..SessionValidationResponse::default()
    }));

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    let err = gate.initialize().await.expect_err("must fail closed");
    assert!(matches!(err, AuthError::Rejected(_)));
    assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn network_failure_during_validation_fails_closed() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &stored_session());
    api.push_validation(Err(ApiError::Transport("timeout".to_string())));

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    let err = gate.initialize().await.expect_err("must fail closed");
    assert!(matches!(err, AuthError::Network(_)));
    assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
}

#[tokio::test]
async fn merge_prefers_server_fields_and_keeps_cached_display_values() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &stored_session());
    api.push_validation(Ok(SessionValidationResponse {
        valid: Some(true),
        user_id: Some("u-server".to_string()),
        client_id: Some("c-server".to_string()),
        user_name: None, // omitted: cached value survives
        user_email: Some("server@example.com".to_string()),
        client_name: Some("Server Lda".to_string()),
        error: None,
    }));

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    let session = gate.initialize().await.expect("validation should succeed");

    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user_id, "u-server");
    assert_eq!(session.client_id, "c-server");
    assert_eq!(session.user_name.as_deref(), Some("Cached Name"));
    assert_eq!(session.user_email.as_deref(), Some("server@example.com"));
    assert_eq!(session.client_name.as_deref(), Some("Server Lda"));

    // The merged session was persisted back.
    let blob = store.get(SESSION_STORAGE_KEY).unwrap().unwrap();
    let persisted: Session = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted, session);
}

#[tokio::test]
async fn invalidate_clears_unconditionally() {
    let api = Arc::new(MockApi::new());
    let store = Arc::new(MemoryStore::new());
    seed_store(&store, &stored_session());

    let gate = gate_with(Arc::clone(&store), Arc::clone(&api));
    gate.invalidate();
    assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);

    // Idempotent on an already-empty store.
    gate.invalidate();
    assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
}
