use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::api::error::SystemError;
use crate::modules::message::schema::MessageEntity;
use crate::modules::message::service::MessageService;
use crate::test::mocks::MockStore;

fn service(store: &Arc<MockStore>) -> MessageService<MockStore, MockStore, MockStore> {
    MessageService::with_dependencies(store.clone(), store.clone(), store.clone())
}

#[tokio::test]
async fn messages_require_an_existing_friendship() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let err = svc.send_message(alice.id, bob.id, "hi".into()).await.unwrap_err();
    assert!(matches!(err, SystemError::Forbidden(_)));
    assert!(store.messages.lock().unwrap().is_empty());

    store.add_friendship(&alice.id, &bob.id);

    let message = svc.send_message(alice.id, bob.id, "hi".into()).await.unwrap();
    assert_eq!(message.sender_id, alice.id);
    assert_eq!(message.receiver_id, bob.id);
    assert!(!message.is_read);
}

#[tokio::test]
async fn blank_content_is_rejected_before_any_lookup() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    let err = svc.send_message(alice.id, bob.id, "   \n".into()).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));
    assert!(store.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sending_to_an_unknown_user_is_not_found() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let err = svc.send_message(alice.id, uuid::Uuid::now_v7(), "hi".into()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn content_is_trimmed_on_send() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    let message = svc.send_message(alice.id, bob.id, "  hello  ".into()).await.unwrap();
    assert_eq!(message.content, "hello");
}

#[tokio::test]
async fn only_the_receiver_may_mark_a_message_read() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    let message = svc.send_message(alice.id, bob.id, "hi".into()).await.unwrap();

    let err = svc.mark_message_as_read(alice.id, message.id).await.unwrap_err();
    assert!(matches!(err, SystemError::Forbidden(_)));

    let read = svc.mark_message_as_read(bob.id, message.id).await.unwrap();
    assert!(read.is_read);

    let err = svc.mark_message_as_read(bob.id, message.id).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));
}

#[tokio::test]
async fn marking_an_unknown_message_is_not_found() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let bob = store.add_user("bob");

    let err = svc.mark_message_as_read(bob.id, uuid::Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn viewing_a_conversation_marks_incoming_messages_read() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    svc.send_message(alice.id, bob.id, "one".into()).await.unwrap();
    svc.send_message(alice.id, bob.id, "two".into()).await.unwrap();
    svc.send_message(bob.id, alice.id, "three".into()).await.unwrap();

    let page = svc.get_conversation(bob.id, alice.id, None, None).await.unwrap();
    assert_eq!(page.len(), 3);
    // Newest first, and the rows Bob received are already read.
    assert_eq!(page[0].content, "three");
    assert_eq!(page[1].content, "two");
    assert_eq!(page[2].content, "one");
    assert!(page[1].is_read);
    assert!(page[2].is_read);
    // Bob's own outgoing message is untouched.
    assert!(!page[0].is_read);

    let stored = store.messages.lock().unwrap();
    assert!(stored.iter().filter(|m| m.receiver_id == bob.id).all(|m| m.is_read));
}

#[tokio::test]
async fn conversation_pages_honor_limit_and_cursor() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    for i in 0..5 {
        svc.send_message(alice.id, bob.id, format!("m{i}")).await.unwrap();
    }

    let first = svc.get_conversation(bob.id, alice.id, Some(2), None).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].content, "m4");
    assert_eq!(first[1].content, "m3");

    let second =
        svc.get_conversation(bob.id, alice.id, Some(2), Some(first[1].id)).await.unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].content, "m2");
    assert_eq!(second[1].content, "m1");
}

#[tokio::test]
async fn tied_timestamps_are_not_skipped_across_pages() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&alice.id, &bob.id);

    // Two messages sharing a timestamp, plus an older one. The cursor must
    // tie-break on id or one of the pair would vanish between pages.
    let tied_at = Utc::now();
    {
        let mut messages = store.messages.lock().unwrap();
        for (content, created_at) in
            [("old", tied_at - Duration::seconds(1)), ("tied-a", tied_at), ("tied-b", tied_at)]
        {
            messages.push(MessageEntity {
                id: Uuid::now_v7(),
                sender_id: alice.id,
                receiver_id: bob.id,
                content: content.to_string(),
                is_read: false,
                created_at,
            });
        }
    }

    let first = svc.get_conversation(bob.id, alice.id, Some(1), None).await.unwrap();
    let second =
        svc.get_conversation(bob.id, alice.id, Some(1), Some(first[0].id)).await.unwrap();
    let third =
        svc.get_conversation(bob.id, alice.id, Some(1), Some(second[0].id)).await.unwrap();

    assert_eq!(first[0].created_at, tied_at);
    assert_eq!(second[0].created_at, tied_at);
    assert_eq!(third[0].content, "old");

    let mut seen =
        vec![first[0].content.clone(), second[0].content.clone(), third[0].content.clone()];
    seen.sort();
    assert_eq!(seen, vec!["old", "tied-a", "tied-b"]);
}

#[tokio::test]
async fn conversation_with_unknown_user_is_not_found() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let bob = store.add_user("bob");

    let err = svc.get_conversation(bob.id, uuid::Uuid::now_v7(), None, None).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn conversation_list_keeps_one_entry_per_counterpart() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let me = store.add_user("me");
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");
    store.add_friendship(&me.id, &alice.id);
    store.add_friendship(&me.id, &bob.id);

    svc.send_message(me.id, alice.id, "to alice".into()).await.unwrap();
    svc.send_message(bob.id, me.id, "from bob 1".into()).await.unwrap();
    svc.send_message(bob.id, me.id, "from bob 2".into()).await.unwrap();
    svc.send_message(alice.id, me.id, "from alice".into()).await.unwrap();

    let list = svc.get_conversation_list(me.id).await.unwrap();
    assert_eq!(list.len(), 2);

    // Ordered by the latest message, most recent conversation first.
    assert_eq!(list[0].user.username, "alice");
    assert_eq!(list[0].last_message.content, "from alice");
    assert_eq!(list[0].unread_count, 1);

    assert_eq!(list[1].user.username, "bob");
    assert_eq!(list[1].last_message.content, "from bob 2");
    assert_eq!(list[1].unread_count, 2);
}

#[tokio::test]
async fn conversation_list_unread_counts_drop_after_viewing() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let me = store.add_user("me");
    let bob = store.add_user("bob");
    store.add_friendship(&me.id, &bob.id);

    svc.send_message(bob.id, me.id, "hello".into()).await.unwrap();
    svc.send_message(bob.id, me.id, "anyone there".into()).await.unwrap();

    svc.get_conversation(me.id, bob.id, None, None).await.unwrap();

    let list = svc.get_conversation_list(me.id).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].unread_count, 0);
}
