use std::sync::Arc;

use crate::api::error::SystemError;
use crate::modules::post::model::{CreatePostBody, UpdatePostBody};
use crate::modules::post::service::PostService;
use crate::test::mocks::MockStore;

fn service(store: &Arc<MockStore>) -> PostService<MockStore, MockStore> {
    PostService::with_dependencies(store.clone(), store.clone())
}

fn text_post(content: &str) -> CreatePostBody {
    CreatePostBody { content: Some(content.to_string()), image_url: None }
}

#[tokio::test]
async fn a_post_needs_content_or_an_image() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let err = svc
        .create_post(alice.id, CreatePostBody { content: None, image_url: None })
        .await
        .unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));

    // Whitespace-only content does not count.
    let err = svc.create_post(alice.id, text_post("   ")).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));
    assert!(store.posts.lock().unwrap().is_empty());

    let image_only = CreatePostBody {
        content: None,
        image_url: Some("https://cdn.example.com/cat.png".to_string()),
    };
    let post = svc.create_post(alice.id, image_only).await.unwrap();
    assert!(post.content.is_none());
    assert!(post.image_url.is_some());
}

#[tokio::test]
async fn post_detail_carries_derived_counts() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let post = svc.create_post(alice.id, text_post("hello world")).await.unwrap();
    svc.like_post(bob.id, post.id).await.unwrap();
    svc.create_comment(bob.id, post.id, "nice".into()).await.unwrap();
    svc.create_comment(alice.id, post.id, "thanks".into()).await.unwrap();

    let seen_by_bob = svc.get_post(bob.id, post.id).await.unwrap();
    assert_eq!(seen_by_bob.likes_count, 1);
    assert_eq!(seen_by_bob.comments_count, 2);
    assert!(seen_by_bob.liked_by_user);
    assert_eq!(seen_by_bob.username, "alice");

    let seen_by_alice = svc.get_post(alice.id, post.id).await.unwrap();
    assert!(!seen_by_alice.liked_by_user);
}

#[tokio::test]
async fn feed_is_newest_first_with_limit_and_offset() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    for i in 0..4 {
        svc.create_post(alice.id, text_post(&format!("p{i}"))).await.unwrap();
    }

    let page = svc.get_feed(alice.id, Some(2), Some(1)).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].content.as_deref(), Some("p2"));
    assert_eq!(page[1].content.as_deref(), Some("p1"));
}

#[tokio::test]
async fn user_posts_require_an_existing_author() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    svc.create_post(alice.id, text_post("mine")).await.unwrap();
    svc.create_post(bob.id, text_post("not mine")).await.unwrap();

    let posts = svc.get_user_posts(alice.id, bob.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].content.as_deref(), Some("mine"));

    let err = svc.get_user_posts(uuid::Uuid::now_v7(), bob.id).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn only_the_author_may_edit_or_delete_a_post() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let post = svc.create_post(alice.id, text_post("original")).await.unwrap();

    let patch = UpdatePostBody { content: Some(Some("edited".to_string())), image_url: None };
    let err = svc.update_post(bob.id, post.id, patch.clone()).await.unwrap_err();
    assert!(matches!(err, SystemError::Forbidden(_)));

    let updated = svc.update_post(alice.id, post.id, patch).await.unwrap();
    assert_eq!(updated.content.as_deref(), Some("edited"));

    let err = svc.delete_post(bob.id, post.id).await.unwrap_err();
    assert!(matches!(err, SystemError::Forbidden(_)));

    svc.delete_post(alice.id, post.id).await.unwrap();
    assert!(store.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn an_edit_may_not_clear_both_content_and_image() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let post = svc.create_post(alice.id, text_post("text only")).await.unwrap();

    let clearing = UpdatePostBody { content: Some(None), image_url: None };
    let err = svc.update_post(alice.id, post.id, clearing).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));

    // Clearing content is fine once an image takes its place.
    let swap = UpdatePostBody {
        content: Some(None),
        image_url: Some(Some("https://cdn.example.com/dog.png".to_string())),
    };
    let updated = svc.update_post(alice.id, post.id, swap).await.unwrap();
    assert!(updated.content.is_none());
    assert!(updated.image_url.is_some());
}

#[tokio::test]
async fn json_null_clears_the_image_while_absence_keeps_the_content() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let body = CreatePostBody {
        content: Some("text".to_string()),
        image_url: Some("https://cdn.example.com/cat.png".to_string()),
    };
    let post = svc.create_post(alice.id, body).await.unwrap();

    let patch: UpdatePostBody = serde_json::from_str(r#"{"image_url": null}"#).unwrap();
    assert_eq!(patch.image_url, Some(None));
    assert!(patch.content.is_none());

    let updated = svc.update_post(alice.id, post.id, patch).await.unwrap();
    assert!(updated.image_url.is_none());
    assert_eq!(updated.content.as_deref(), Some("text"));
}

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let post = svc.create_post(alice.id, text_post("discuss")).await.unwrap();
    svc.create_comment(bob.id, post.id, "first".into()).await.unwrap();
    svc.create_comment(alice.id, post.id, "second".into()).await.unwrap();

    let comments = svc.get_comments(post.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "first");
    assert_eq!(comments[0].username, "bob");
    assert_eq!(comments[1].content, "second");
}

#[tokio::test]
async fn empty_comments_and_missing_posts_are_rejected() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let post = svc.create_post(alice.id, text_post("hello")).await.unwrap();

    let err = svc.create_comment(alice.id, post.id, "  ".into()).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));

    let err = svc.create_comment(alice.id, uuid::Uuid::now_v7(), "hi".into()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn only_the_author_may_delete_a_comment() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let post = svc.create_post(alice.id, text_post("hello")).await.unwrap();
    let comment = svc.create_comment(bob.id, post.id, "mine".into()).await.unwrap();

    let err = svc.delete_comment(alice.id, comment.id).await.unwrap_err();
    assert!(matches!(err, SystemError::Forbidden(_)));

    svc.delete_comment(bob.id, comment.id).await.unwrap();
    assert!(store.comments.lock().unwrap().is_empty());

    let err = svc.delete_comment(bob.id, comment.id).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn liking_twice_conflicts_and_unliking_twice_fails() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    let bob = store.add_user("bob");

    let post = svc.create_post(alice.id, text_post("likeable")).await.unwrap();

    svc.like_post(bob.id, post.id).await.unwrap();
    let err = svc.like_post(bob.id, post.id).await.unwrap_err();
    assert!(matches!(err, SystemError::Conflict(_)));
    assert_eq!(store.likes.lock().unwrap().len(), 1);

    svc.unlike_post(bob.id, post.id).await.unwrap();
    let err = svc.unlike_post(bob.id, post.id).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));
    assert!(store.likes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn likes_on_a_missing_post_are_not_found() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let err = svc.like_post(alice.id, uuid::Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));

    let err = svc.unlike_post(alice.id, uuid::Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}
