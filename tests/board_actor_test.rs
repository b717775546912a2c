use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use whatsflow_board::api::{ApiError, MockApi, OrdersResponse, RawOrder};
use whatsflow_board::board_actor::{self, BoardClient, BoardContext, BoardError, RefreshKind};
use whatsflow_board::model::OrderStatus;
use whatsflow_board::notify::RecordingSink;
use whatsflow_board::storage::{KeyValueStore, MemoryStore, SOUND_STORAGE_KEY};

fn raw_order(id: &str, status: &str, created_at: &str) -> RawOrder {
    RawOrder {
        id: id.to_string(),
        order_number: Some(format!("N-{id}")),
        status: status.to_string(),
        order_data: json!({ "customerName": "Maria", "items": [{ "name": "Bifana" }] }),
        created_at: Some(created_at.to_string()),
        updated_at: None,
    }
}

fn orders_response(orders: Vec<RawOrder>) -> OrdersResponse {
    OrdersResponse {
        orders,
        ..OrdersResponse::default()
    }
}

struct Harness {
    api: Arc<MockApi>,
    sink: Arc<RecordingSink>,
    store: Arc<MemoryStore>,
    board: BoardClient,
    handle: JoinHandle<()>,
}

fn spawn_board() -> Harness {
    let api = Arc::new(MockApi::new());
    let sink = Arc::new(RecordingSink::new());
    let store = Arc::new(MemoryStore::new());

    let (actor, board) = board_actor::new(32);
    let context = BoardContext {
        api: Arc::clone(&api) as Arc<dyn whatsflow_board::api::DashboardApi>,
        sink: Arc::clone(&sink) as Arc<dyn whatsflow_board::notify::NotificationSink>,
        store: Arc::clone(&store) as Arc<dyn KeyValueStore>,
        token: "token-1".to_string(),
    };
    let handle = tokio::spawn(actor.run(context));

    Harness {
        api,
        sink,
        store,
        board,
        handle,
    }
}

async fn wait_for_update_call(api: &MockApi) {
    for _ in 0..200 {
        if !api.update_calls().is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("status update was never issued");
}

#[tokio::test]
async fn seed_populates_views_without_ringing() {
    let h = spawn_board();
    h.api.push_orders(Ok(orders_response(vec![
        raw_order("o1", "new", "2026-03-01T10:00:00Z"),
        raw_order("o2", "preparacao", "2026-03-01T09:00:00Z"),
        raw_order("o3", "concluido", "2026-03-01T08:00:00Z"),
    ])));

    let summary = h.board.refresh(RefreshKind::Seed).await.expect("seed failed");
    assert_eq!(summary.total, 3);
    assert_eq!(summary.new_arrivals, 3);
    assert_eq!(h.sink.count(), 0, "seeding must not ring the bell");

    let active = h.board.active_view().await.unwrap();
    let ids: Vec<&str> = active.iter().map(|o| o.id.as_str()).collect();
    // In-progress first even though o1 is more recent.
    assert_eq!(ids, vec!["o2", "o1"]);
    assert!(active.iter().all(|o| o.status != OrderStatus::Completed));

    let history = h.board.history_view().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, "o3");

    drop(h.board);
    h.handle.await.unwrap();
}

#[tokio::test]
async fn second_poll_with_unchanged_set_is_silent() {
    let h = spawn_board();
    h.api
        .push_orders(Ok(orders_response(vec![raw_order("o1", "new", "2026-03-01T10:00:00Z")])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    let both = vec![
        raw_order("o1", "new", "2026-03-01T10:00:00Z"),
        raw_order("o2", "new", "2026-03-01T10:05:00Z"),
    ];
    h.api.push_orders(Ok(orders_response(both.clone())));
    let summary = h.board.refresh(RefreshKind::Poll).await.unwrap();
    assert_eq!(summary.new_arrivals, 1);
    assert_eq!(h.sink.signalled(), vec!["o2".to_string()]);

    h.api.push_orders(Ok(orders_response(both)));
    let summary = h.board.refresh(RefreshKind::Poll).await.unwrap();
    assert_eq!(summary.new_arrivals, 0);
    assert_eq!(h.sink.count(), 1, "unchanged remote set must stay silent");
}

#[tokio::test]
async fn sound_preference_gates_and_persists() {
    let h = spawn_board();
    h.api.push_orders(Ok(orders_response(vec![])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    h.board.set_sound_enabled(false).await.unwrap();
    assert_eq!(
        h.store.get(SOUND_STORAGE_KEY).unwrap().as_deref(),
        Some("false")
    );

    h.api
        .push_orders(Ok(orders_response(vec![raw_order("o1", "new", "2026-03-01T10:00:00Z")])));
    h.board.refresh(RefreshKind::Poll).await.unwrap();
    assert_eq!(h.sink.count(), 0, "muted board must not ring");

    // A fresh actor over the same store starts muted.
    drop(h.board);
    h.handle.await.unwrap();
    let (actor, board) = board_actor::new(32);
    let context = BoardContext {
        api: Arc::clone(&h.api) as _,
        sink: Arc::clone(&h.sink) as _,
        store: Arc::clone(&h.store) as _,
        token: "token-1".to_string(),
    };
    let handle = tokio::spawn(actor.run(context));
    assert!(!board.sound_enabled().await.unwrap());
    drop(board);
    handle.await.unwrap();
}

#[tokio::test]
async fn completing_an_order_moves_it_to_history_after_resync() {
    let h = spawn_board();
    h.api.push_orders(Ok(orders_response(vec![
        raw_order("o1", "new", "2026-03-01T10:00:00Z"),
        raw_order("o2", "new", "2026-03-01T09:00:00Z"),
    ])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    h.api.push_update(Ok(()));
    // The server's post-update view of the world, served to the resync.
    h.api.push_orders(Ok(orders_response(vec![
        raw_order("o1", "concluido", "2026-03-01T10:00:00Z"),
        raw_order("o2", "new", "2026-03-01T09:00:00Z"),
    ])));

    h.board
        .apply_transition("o1", OrderStatus::Completed)
        .await
        .expect("transition failed");

    assert_eq!(
        h.api.update_calls(),
        vec![("o1".to_string(), OrderStatus::Completed)]
    );

    let active = h.board.active_view().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "o2");

    let history = h.board.history_view().await.unwrap();
    let completed_ids: Vec<&str> = history.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(completed_ids, vec!["o1"], "no duplication after resync");
}

#[tokio::test]
async fn failed_update_restores_the_exact_previous_view() {
    let h = spawn_board();
    h.api.push_orders(Ok(orders_response(vec![
        raw_order("o1", "new", "2026-03-01T10:00:00Z"),
        raw_order("o2", "preparacao", "2026-03-01T09:00:00Z"),
    ])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    let before = h.board.active_view().await.unwrap();
    h.api
        .push_update(Err(ApiError::server(500, "Falha ao atualizar status")));

    let err = h
        .board
        .apply_transition("o1", OrderStatus::Completed)
        .await
        .expect_err("update should have failed");
    assert!(matches!(err, BoardError::Mutation(_)));

    let after = h.board.active_view().await.unwrap();
    assert_eq!(after, before, "rollback must restore the exact snapshot");
    // No resync happens on failure: one seed fetch only.
    assert_eq!(h.api.orders_calls(), 1);
}

#[tokio::test]
async fn unknown_order_is_rejected() {
    let h = spawn_board();
    h.api.push_orders(Ok(orders_response(vec![])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    let err = h
        .board
        .apply_transition("ghost", OrderStatus::Completed)
        .await
        .expect_err("missing order must be rejected");
    assert!(matches!(err, BoardError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_transition_for_same_order_is_rejected() {
    let h = spawn_board();
    h.api
        .push_orders(Ok(orders_response(vec![raw_order("o1", "new", "2026-03-01T10:00:00Z")])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    let gate = h.api.hold_next_update();
    h.api.push_update(Ok(()));
    h.api.push_orders(Ok(orders_response(vec![
        raw_order("o1", "preparacao", "2026-03-01T10:00:00Z"),
    ])));

    let board = h.board.clone();
    let first = tokio::spawn(async move {
        board.apply_transition("o1", OrderStatus::InProgress).await
    });
    wait_for_update_call(&h.api).await;

    // The optimistic patch is visible while the update is in flight.
    let active = h.board.active_view().await.unwrap();
    assert_eq!(active[0].status, OrderStatus::InProgress);
    assert_eq!(active[0].raw_status, "in-progress");

    // A second transition for the same id is refused outright.
    let err = h
        .board
        .apply_transition("o1", OrderStatus::Completed)
        .await
        .expect_err("second transition must be rejected");
    assert!(matches!(err, BoardError::TransitionInFlight(_)));

    gate.release();
    first.await.unwrap().expect("first transition should succeed");
    assert_eq!(h.api.update_calls().len(), 1, "only one update was issued");
}

#[tokio::test]
async fn history_is_bounded_to_the_25_most_recent() {
    let h = spawn_board();
    let orders: Vec<RawOrder> = (0..30)
        .map(|i| {
            raw_order(
                &format!("o{i}"),
                "concluido",
                &format!("2026-03-01T10:{i:02}:00Z"),
            )
        })
        .collect();
    h.api.push_orders(Ok(orders_response(orders)));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    let history = h.board.history_view().await.unwrap();
    assert_eq!(history.len(), 25);
    // Most recent first; the five oldest fell off.
    assert_eq!(history[0].id, "o29");
    assert_eq!(history[24].id, "o5");
    assert!(h.board.active_view().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_orders() {
    let h = spawn_board();
    h.api
        .push_orders(Ok(orders_response(vec![raw_order("o1", "new", "2026-03-01T10:00:00Z")])));
    h.board.refresh(RefreshKind::Seed).await.unwrap();

    h.api
        .push_orders(Err(ApiError::Transport("connection refused".to_string())));
    let err = h
        .board
        .refresh(RefreshKind::Manual)
        .await
        .expect_err("refresh should surface the failure");
    assert!(matches!(err, BoardError::Network(_)));

    let active = h.board.active_view().await.unwrap();
    assert_eq!(active.len(), 1, "stale orders remain available");
    assert_eq!(active[0].id, "o1");
}
