use marquee_core::{ParticipantId, ScreenId, StatusUpdate};
use serde_json::Value;

use crate::integration::{create_manager, init_tracing};
use crate::utils::MockHandle;

#[tokio::test]
async fn snapshot_covers_every_configured_screen() {
    init_tracing();
    let (manager, _fanout) = create_manager();

    manager.register(ScreenId(2), MockHandle::new()).await.unwrap();
    manager.register(ScreenId(6), MockHandle::new()).await.unwrap();

    let snapshot = manager.status_snapshot().await;
    assert_eq!(snapshot.len(), 6);

    for update in &snapshot {
        let expected = update.screen_id() == ScreenId(2) || update.screen_id() == ScreenId(6);
        assert_eq!(update.connected(), expected, "screen {}", update.screen_id());
    }
}

#[tokio::test]
async fn subscriber_receives_snapshot_then_live_updates() {
    init_tracing();
    let (manager, fanout) = create_manager();
    manager.register(ScreenId(1), MockHandle::new()).await.unwrap();

    let observer = MockHandle::new();
    fanout
        .subscribe(
            ParticipantId::new(),
            observer.clone(),
            &manager.status_snapshot().await,
        )
        .await
        .unwrap();

    // Snapshot: one entry per configured screen, screen 1 connected.
    let frames = observer.sent().await;
    assert_eq!(frames.len(), 6);
    let first: Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(first["type"], "screen_status_update");
    assert_eq!(first["screen_id"], 1);
    assert_eq!(first["connected"], true);

    // A disconnect after subscribing shows up as a seventh frame.
    manager.deregister(ScreenId(1)).await;
    let frames = observer.sent().await;
    assert_eq!(frames.len(), 7);
    assert!(frames[6].contains(r#""connected":false"#));
}

#[tokio::test]
async fn failed_observer_is_removed_without_aborting_the_pass() {
    init_tracing();
    let (_manager, fanout) = create_manager();

    let dead = MockHandle::new();
    let alive = MockHandle::new();
    fanout
        .subscribe(ParticipantId::new(), dead.clone(), &[])
        .await
        .unwrap();
    fanout
        .subscribe(ParticipantId::new(), alive.clone(), &[])
        .await
        .unwrap();
    assert_eq!(fanout.observer_count(), 2);

    dead.set_failing(true);
    fanout.publish(StatusUpdate::new(ScreenId(3), true)).await;

    // The healthy observer still got the event; the dead one is gone.
    assert_eq!(alive.sent().await.len(), 1);
    assert_eq!(fanout.observer_count(), 1);

    fanout.publish(StatusUpdate::new(ScreenId(3), false)).await;
    assert_eq!(alive.sent().await.len(), 2);
}

#[tokio::test]
async fn observer_that_cannot_take_snapshot_is_never_added() {
    init_tracing();
    let (manager, fanout) = create_manager();

    let observer = MockHandle::failing();
    let result = fanout
        .subscribe(
            ParticipantId::new(),
            observer.clone(),
            &manager.status_snapshot().await,
        )
        .await;

    assert!(result.is_err());
    assert_eq!(fanout.observer_count(), 0);
}

#[tokio::test]
async fn unsubscribe_is_idempotent() {
    init_tracing();
    let (_manager, fanout) = create_manager();

    let id = ParticipantId::new();
    fanout.subscribe(id, MockHandle::new(), &[]).await.unwrap();

    fanout.unsubscribe(&id);
    fanout.unsubscribe(&id);
    assert_eq!(fanout.observer_count(), 0);
}
