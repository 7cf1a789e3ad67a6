//! Feed polling, guard, filtering and read tracking.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::ScriptedSource;
use common::event;
use opsdesk_lib::inbox::EventFilter;
use opsdesk_lib::inbox::Inbox;
use opsdesk_lib::inbox::InboxConfig;
use opsdesk_lib::inbox::InboxFrame;
use opsdesk_lib::inbox::ReadState;
use opsdesk_lib::model::EventCategory;
use opsdesk_lib::model::Severity;
use opsdesk_lib::store::MemoryStore;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;

fn inbox(source: Arc<ScriptedSource>) -> (Inbox, UnboundedReceiver<InboxFrame>) {
    let read_state = ReadState::new(Arc::new(MemoryStore::new()));
    Inbox::new(source, read_state, InboxConfig::default())
}

fn ids(frame: &InboxFrame) -> Vec<i64> {
    frame.items.iter().map(|item| item.event.id).collect()
}

fn mixed_batch() -> Vec<opsdesk_lib::model::Event> {
    vec![
        event(6, "work_order", Severity::Danger),
        event(5, "work_order_status", Severity::Info),
        event(4, "plan_published", Severity::Danger),
        event(3, "po_created", Severity::Success),
        event(2, "auth_login", Severity::Info),
        event(1, "work_order", Severity::Danger),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_fetches_immediately_then_every_interval() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());
    let start = tokio::time::Instant::now();

    let handle = inbox.activate();
    let first = frames.recv().await.unwrap();
    assert_eq!(ids(&first), vec![6, 5, 4, 3, 2, 1]);
    assert!(first.fetched_at.is_some());
    assert!(start.elapsed() < Duration::from_secs(1));

    frames.recv().await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(5));
    frames.recv().await.unwrap();
    assert_eq!(source.calls(), 3);

    inbox.deactivate(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_discards_in_flight_fetch() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()).gated());
    let (inbox, mut frames) = inbox(source.clone());

    let handle = inbox.activate();
    source.started.notified().await;
    assert_eq!(source.calls(), 1);

    // Leave while the fetch is still outstanding, then let it finish.
    let task = inbox.deactivate(handle);
    source.release();
    task.await.unwrap();

    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.calls(), 1);
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn test_reactivation_makes_old_fetch_stale() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()).gated());
    let (inbox, mut frames) = inbox(source.clone());

    let first = inbox.activate();
    source.started.notified().await;
    let old = inbox.deactivate(first);
    let second = inbox.activate();
    assert_eq!(inbox.generation(), second.generation());

    // One permit each: the stale fetch and the new activation's first fetch.
    source.release();
    source.release();
    old.await.unwrap();

    let frame = frames.recv().await.unwrap();
    assert_eq!(frame.items.len(), 6);
    assert_eq!(source.calls(), 2);
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
    inbox.deactivate(second).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_filter_rerenders_without_refetch() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    let handle = inbox.activate();
    frames.recv().await.unwrap();

    inbox
        .set_filter(EventFilter::new(Some(EventCategory::WorkOrder), Some(Severity::Danger)))
        .await;
    let filtered = frames.try_recv().unwrap();
    assert_eq!(ids(&filtered), vec![6, 1]);
    assert_eq!(source.calls(), 1);

    inbox
        .set_filter(EventFilter::new(Some(EventCategory::Auth), Some(Severity::Danger)))
        .await;
    assert!(frames.try_recv().unwrap().items.is_empty());

    // The next poll keeps the filter.
    inbox.set_filter(EventFilter::new(Some(EventCategory::Plan), None)).await;
    frames.try_recv().unwrap();
    let polled = frames.recv().await.unwrap();
    assert_eq!(ids(&polled), vec![4]);
    assert_eq!(source.calls(), 2);

    inbox.deactivate(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_poll_keeps_last_batch() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(mixed_batch()),
        Err("Bad gateway".to_string()),
        Ok(vec![event(9, "plan_published", Severity::Success)]),
    ]));
    let (inbox, mut frames) = inbox(source.clone());

    let handle = inbox.activate();
    let good = frames.recv().await.unwrap();
    assert_eq!(good.error, None);

    let failed = frames.recv().await.unwrap();
    assert_eq!(failed.error.as_deref(), Some("Bad gateway"));
    assert_eq!(ids(&failed), ids(&good));
    assert_eq!(failed.fetched_at, good.fetched_at);

    let recovered = frames.recv().await.unwrap();
    assert_eq!(recovered.error, None);
    assert_eq!(ids(&recovered), vec![9]);

    inbox.deactivate(handle).await.unwrap();
}

#[tokio::test]
async fn test_mark_read_then_clear() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    let frame = inbox.refresh().await.unwrap();
    assert_eq!(frame.unread(), 6);

    for id in [1, 2, 3, 4, 5] {
        inbox.mark_read(id).await;
    }
    inbox.mark_read(5).await;
    // Marking does not draw by itself.
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));

    let frame = inbox.frame().await;
    assert_eq!(frame.unread(), 1);
    assert!(!frame.items[0].read);
    assert!(frame.items[1..].iter().all(|item| item.read));

    // Not being shown, so nothing is drawn; the next frame has no flags.
    inbox.clear_read().await;
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(inbox.frame().await.unread(), 6);
    assert!(inbox.read_state().load().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clear_read_redraws_active_feed() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    let handle = inbox.activate();
    frames.recv().await.unwrap();
    inbox.mark_read(6).await;

    inbox.clear_read().await;
    let redrawn = frames.try_recv().unwrap();
    assert_eq!(redrawn.unread(), 6);

    inbox.deactivate(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_inactive_feed_is_not_redrawn() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    assert!(!inbox.is_active());
    let handle = inbox.activate();
    assert!(inbox.is_active());
    frames.recv().await.unwrap();
    inbox.deactivate(handle).await.unwrap();
    assert!(!inbox.is_active());

    inbox.clear_read().await;
    inbox.set_filter(EventFilter::new(Some(EventCategory::Plan), None)).await;
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
    // The filter still applies once the feed is shown again.
    assert_eq!(ids(&inbox.frame().await), vec![4]);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_handle_stops_polling() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    let handle = inbox.activate();
    frames.recv().await.unwrap();
    drop(handle);
    assert!(!inbox.is_active());

    tokio::time::sleep(Duration::from_secs(50)).await;
    assert_eq!(source.calls(), 1);
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn test_activate_cancels_previous_task() {
    let source = Arc::new(ScriptedSource::always(mixed_batch()));
    let (inbox, mut frames) = inbox(source.clone());

    let first = inbox.activate();
    frames.recv().await.unwrap();
    let second = inbox.activate();
    frames.recv().await.unwrap();
    assert_eq!(source.calls(), 2);

    // Deactivating the superseded handle leaves the live one alone.
    inbox.deactivate(first).await.unwrap();
    assert!(inbox.is_active());
    assert_eq!(inbox.generation(), second.generation());

    inbox.deactivate(second).await.unwrap();
    let calls = source.calls();
    tokio::time::sleep(Duration::from_secs(50)).await;
    assert_eq!(source.calls(), calls);
}

#[tokio::test]
async fn test_refresh_error_is_returned() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(mixed_batch()), Err("down".into())]));
    let (inbox, _frames) = inbox(source);

    inbox.refresh().await.unwrap();
    let err = inbox.refresh().await.unwrap_err();
    assert_eq!(err.message(), "down");
    // The last good batch is still there.
    assert_eq!(inbox.frame().await.items.len(), 6);
}
