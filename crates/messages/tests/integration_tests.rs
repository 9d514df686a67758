//! Integration tests for the messages domain crate.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use messages_domain::{
    InMemoryMessageStore, Message, MessageService, MessageSnapshot, MessageStore, NewMessage,
};

fn snapshot(content: &str) -> MessageSnapshot {
    Message::create(NewMessage::new(content, "room-1", "user-1", Utc::now(), false))
        .expect("valid message")
        .into_snapshot()
}

#[tokio::test]
async fn create_scenario_populates_every_field() {
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let snapshot = Message::create(NewMessage::new("hi", "room-1", "user-1", t0, false))
        .expect("valid message")
        .to_snapshot();

    assert_eq!(snapshot.room_id, "room-1");
    assert_eq!(snapshot.sender_id, "user-1");
    assert_eq!(snapshot.content, "hi");
    assert!(!snapshot.is_read);
    assert_eq!(snapshot.timestamp, t0);
    assert!(!snapshot.message_id.is_empty());
}

#[tokio::test]
async fn concurrent_writes_are_all_preserved() {
    let store = Arc::new(InMemoryMessageStore::new());
    let before = store.list().await.unwrap().len();

    let m1 = snapshot("first");
    let m2 = snapshot("second");
    assert_ne!(m1.message_id, m2.message_id);

    let (a, b) = tokio::join!(
        tokio::spawn({
            let store = Arc::clone(&store);
            let m1 = m1.clone();
            async move { store.create(m1).await }
        }),
        tokio::spawn({
            let store = Arc::clone(&store);
            let m2 = m2.clone();
            async move { store.create(m2).await }
        }),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), before + 2);
    assert!(listed.contains(&m1));
    assert!(listed.contains(&m2));
}

#[tokio::test]
async fn many_concurrent_service_writes_have_distinct_ids() {
    let service = MessageService::new(Arc::new(InMemoryMessageStore::new()));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_message(NewMessage::new(
                        format!("message {i}"),
                        "room-1",
                        "user-1",
                        Utc::now(),
                        false,
                    ))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let listed = service.list_messages().await.unwrap();
    let ids: HashSet<_> = listed.iter().map(|m| m.message_id.clone()).collect();
    assert_eq!(listed.len(), 32);
    assert_eq!(ids.len(), 32);
}
