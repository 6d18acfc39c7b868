use chrono::{Duration, Utc};
use mindflow_persist::{InMemoryStore, JournalStore, MoodStore, PersistError, ThreadStore};
use mindflow_types::{Message, Mood, NewJournalEntry, NewMoodEntry, NewThread, ThreadUpdate};

#[tokio::test]
async fn test_create_and_get_thread() {
    let store = InMemoryStore::new();
    let thread = store
        .create_thread("alice", NewThread::new("t1"))
        .await
        .unwrap();
    assert_eq!(thread.title, "New Conversation");

    let fetched = store.get_thread("alice", "t1").await.unwrap().unwrap();
    assert_eq!(fetched.thread_id, "t1");

    // Other owners cannot see it
    assert!(store.get_thread("bob", "t1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_thread_rejected() {
    let store = InMemoryStore::new();
    store.create_thread("alice", NewThread::new("t1")).await.unwrap();
    let err = store
        .create_thread("alice", NewThread::new("t1"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistError::ThreadExists(_)));
}

#[tokio::test]
async fn test_versioned_update_rejects_stale_write() {
    let store = InMemoryStore::new();
    store.create_thread("alice", NewThread::new("t1")).await.unwrap();

    let newer = ThreadUpdate::messages(vec![
        Message::user("m1", "Hi"),
        Message::assistant("m2", "Hello there"),
    ])
    .with_version(2);
    store.update_thread("alice", "t1", newer).await.unwrap();

    // An older save completing late must not clobber the newer one
    let older = ThreadUpdate::messages(vec![Message::user("m1", "Hi")]).with_version(1);
    let err = store.update_thread("alice", "t1", older).await.unwrap_err();
    assert!(matches!(err, PersistError::StaleWrite { version: 1, .. }));

    let thread = store.get_thread("alice", "t1").await.unwrap().unwrap();
    assert_eq!(thread.messages.len(), 2);
    assert_eq!(thread.save_version, 2);

    // Unversioned updates always apply
    store
        .update_thread("alice", "t1", ThreadUpdate::title("Renamed"))
        .await
        .unwrap();
    let thread = store.get_thread("alice", "t1").await.unwrap().unwrap();
    assert_eq!(thread.title, "Renamed");
    assert_eq!(thread.messages.len(), 2);
}

#[tokio::test]
async fn test_update_and_delete_missing_thread() {
    let store = InMemoryStore::new();
    let err = store
        .update_thread("alice", "nope", ThreadUpdate::title("x"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(store.delete_thread("alice", "nope").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_list_threads_newest_first() {
    let store = InMemoryStore::new();
    store.create_thread("alice", NewThread::new("old")).await.unwrap();
    store.create_thread("alice", NewThread::new("new")).await.unwrap();
    store.create_thread("bob", NewThread::new("other")).await.unwrap();
    store
        .update_thread("alice", "new", ThreadUpdate::title("Fresh"))
        .await
        .unwrap();

    let threads = store.list_threads("alice", 10).await.unwrap();
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].thread_id, "new");

    let limited = store.list_threads("alice", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_moods_filtered_by_since() {
    let store = InMemoryStore::new();
    let mut old = NewMoodEntry::new(Mood::Bad);
    old.timestamp = Some(Utc::now() - Duration::days(10));
    store.save_mood("alice", old).await.unwrap();
    store.save_mood("alice", NewMoodEntry::new(Mood::Great)).await.unwrap();

    let recent = store
        .list_moods("alice", Some(Utc::now() - Duration::days(7)), 100)
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].mood, Mood::Great);

    let all = store.list_moods("alice", None, 100).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].mood, Mood::Bad);
}

#[tokio::test]
async fn test_mood_without_value_rejected() {
    let store = InMemoryStore::new();
    let err = store
        .save_mood("alice", NewMoodEntry::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PersistError::Validation(_)));
}

#[tokio::test]
async fn test_journal_lifecycle() {
    let store = InMemoryStore::new();
    let entry = store
        .save_journal("alice", NewJournalEntry::new("Walked by the sea"))
        .await
        .unwrap();
    assert_eq!(store.list_journals("alice").await.unwrap().len(), 1);
    assert!(store.list_journals("bob").await.unwrap().is_empty());

    assert!(store.delete_journal("bob", &entry.id).await.is_err());
    store.delete_journal("alice", &entry.id).await.unwrap();
    assert!(store.list_journals("alice").await.unwrap().is_empty());
}
