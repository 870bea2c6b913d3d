use marquee_core::{ContentDescriptor, ContentKind, ParticipantId, ScreenCommand, ScreenId};
use marquee_server::RegisterError;
use std::sync::Arc;
use std::time::Duration;

use crate::integration::{create_manager, init_tracing};
use crate::utils::MockHandle;

#[tokio::test]
async fn register_rejects_duplicate_and_keeps_first_connection() {
    init_tracing();
    let (manager, fanout) = create_manager();
    let observer = MockHandle::new();
    fanout
        .subscribe(ParticipantId::new(), observer.clone(), &[])
        .await
        .unwrap();

    let first = MockHandle::new();
    let second = MockHandle::new();
    let id = ScreenId(3);

    manager.register(id, first.clone()).await.unwrap();

    let err = manager.register(id, second.clone()).await.unwrap_err();
    assert_eq!(err, RegisterError::DuplicateConnection(id));

    // First connection untouched, second closed with an explicit reason.
    assert!(!first.is_closed().await);
    assert_eq!(
        second.close_reason().await.as_deref(),
        Some("screen already connected")
    );
    assert!(manager.is_connected(id).await);

    // Exactly one connect event reached the observer.
    assert_eq!(observer.sent_types().await, vec!["screen_status_update"]);
}

#[tokio::test]
async fn register_rejects_unknown_screen_id() {
    init_tracing();
    let (manager, _fanout) = create_manager();
    let handle = MockHandle::new();
    let id = ScreenId(42);

    let err = manager.register(id, handle.clone()).await.unwrap_err();

    assert_eq!(err, RegisterError::UnknownScreenId(id));
    assert_eq!(
        handle.close_reason().await.as_deref(),
        Some("unknown screen id")
    );
    assert!(!manager.is_connected(id).await);
}

#[tokio::test]
async fn deregister_is_idempotent_and_emits_one_event() {
    init_tracing();
    let (manager, fanout) = create_manager();
    let observer = MockHandle::new();
    fanout
        .subscribe(ParticipantId::new(), observer.clone(), &[])
        .await
        .unwrap();

    let id = ScreenId(1);
    manager.register(id, MockHandle::new()).await.unwrap();
    manager.deregister(id).await;
    manager.deregister(id).await;

    assert!(!manager.is_connected(id).await);

    // One connect event plus one disconnect event, nothing more.
    let events = observer.sent().await;
    assert_eq!(events.len(), 2);
    assert!(events[0].contains(r#""connected":true"#));
    assert!(events[1].contains(r#""connected":false"#));
}

#[tokio::test]
async fn send_command_delivers_reload_to_connected_screen() {
    init_tracing();
    let (manager, _fanout) = create_manager();
    let screen = MockHandle::new();
    let id = ScreenId(2);

    manager.register(id, screen.clone()).await.unwrap();
    manager.send_command(id, &ScreenCommand::Reload).await;

    assert_eq!(screen.sent().await, vec![r#"{"type":"reload"}"#.to_string()]);
}

#[tokio::test]
async fn send_command_to_disconnected_screen_is_a_no_op() {
    init_tracing();
    let (manager, _fanout) = create_manager();

    // No panic, no error surfaced; the screen will catch up on reconnect.
    manager.send_command(ScreenId(5), &ScreenCommand::Reload).await;
    assert!(!manager.is_connected(ScreenId(5)).await);
}

#[tokio::test]
async fn send_failure_prunes_screen_and_publishes_disconnect() {
    init_tracing();
    let (manager, fanout) = create_manager();
    let observer = MockHandle::new();
    fanout
        .subscribe(ParticipantId::new(), observer.clone(), &[])
        .await
        .unwrap();

    let screen = MockHandle::new();
    let id = ScreenId(4);
    manager.register(id, screen.clone()).await.unwrap();

    screen.set_failing(true);
    manager.send_command(id, &ScreenCommand::Reload).await;

    assert!(!manager.is_connected(id).await);
    let events = observer.sent().await;
    assert_eq!(events.len(), 2);
    assert!(events[1].contains(r#""connected":false"#));
}

#[tokio::test]
async fn broadcast_command_survives_one_dead_screen() {
    init_tracing();
    let (manager, _fanout) = create_manager();

    let healthy = MockHandle::new();
    let dead = MockHandle::failing();
    manager.register(ScreenId(1), healthy.clone()).await.unwrap();
    manager.register(ScreenId(2), dead.clone()).await.unwrap();

    let mut content = ContentDescriptor::default_content();
    content.kind = ContentKind::Url;
    content.url = "https://example.com/board".to_string();
    manager
        .broadcast_command(&ScreenCommand::Show(content))
        .await;

    // The healthy screen got the push, the dead one was pruned.
    let delivered = healthy.sent().await;
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].contains("https://example.com/board"));
    assert!(manager.is_connected(ScreenId(1)).await);
    assert!(!manager.is_connected(ScreenId(2)).await);
}

#[tokio::test]
async fn reconnect_during_slow_disconnect_delivery_keeps_event_order() {
    init_tracing();
    let (manager, fanout) = create_manager();
    let observer = MockHandle::new();
    fanout
        .subscribe(ParticipantId::new(), observer.clone(), &[])
        .await
        .unwrap();

    let id = ScreenId(3);
    manager.register(id, MockHandle::new()).await.unwrap();

    // The disconnect event is slow to reach the observer while a reconnect
    // for the same screen races it. The reconnect must wait its turn: the
    // observer sees connect, disconnect, connect, never the last two swapped.
    observer.delay_next_send(Duration::from_millis(50)).await;
    let disconnect = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.deregister(id).await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    let reconnect = tokio::spawn({
        let manager = Arc::clone(&manager);
        async move { manager.register(id, MockHandle::new()).await }
    });

    disconnect.await.unwrap();
    reconnect.await.unwrap().expect("reconnect was rejected");

    let events = observer.sent().await;
    assert_eq!(events.len(), 3);
    assert!(events[1].contains(r#""connected":false"#));
    assert!(events[2].contains(r#""connected":true"#));
    assert!(manager.is_connected(id).await);
}
