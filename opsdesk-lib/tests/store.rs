//! SQLite-backed read state.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use opsdesk_lib::inbox::READ_EVENTS_KEY;
use opsdesk_lib::inbox::ReadState;
use opsdesk_lib::store::KvStore;
use opsdesk_lib::store::SqliteStore;

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

fn temp_db() -> PathBuf {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!("opsdesk-test-{}-{}.db", std::process::id(), n));
    let _ = std::fs::remove_file(&path);
    path
}

#[tokio::test]
async fn test_read_state_survives_reopen() {
    let path = temp_db();

    {
        let read = ReadState::new(Arc::new(SqliteStore::open(&path).await.unwrap()));
        for id in [9, 3, 7, 3] {
            read.mark_read(id).await;
        }
    }

    let store = Arc::new(SqliteStore::open(&path).await.unwrap());
    assert_eq!(store.get(READ_EVENTS_KEY).await.unwrap().as_deref(), Some("[3,7,9]"));
    let read = ReadState::new(store);
    assert_eq!(read.load().await, BTreeSet::from([3, 7, 9]));

    read.clear().await;
    assert!(read.load().await.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_corrupt_value_reads_as_empty() {
    let path = temp_db();
    let store = Arc::new(SqliteStore::open(&path).await.unwrap());
    store.set(READ_EVENTS_KEY, "[1, \"two\"]".to_string()).await.unwrap();

    let read = ReadState::new(store.clone());
    assert!(read.load().await.is_empty());
    read.mark_read(4).await;
    assert_eq!(read.load().await, BTreeSet::from([4]));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_set_overwrites_and_clear_missing_key() {
    let path = temp_db();
    let store = SqliteStore::open(&path).await.unwrap();

    store.set("theme", "dark".into()).await.unwrap();
    store.set("theme", "light".into()).await.unwrap();
    assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
    store.clear("nothing-here").await.unwrap();
    assert_eq!(store.get("nothing-here").await.unwrap(), None);

    let _ = std::fs::remove_file(&path);
}
