use std::sync::Arc;

use crate::api::error::SystemError;
use crate::modules::user::model::{
    SignInModel, SignUpModel, UpdatePasswordModel, UpdateProfileModel,
};
use crate::modules::user::service::UserService;
use crate::test::mocks::MockStore;
use crate::utils::Claims;
use crate::ENV;

fn service(store: &Arc<MockStore>) -> UserService<MockStore> {
    // Token issuing reads the process environment; give it something sane
    // before the lazy static is first touched.
    if std::env::var("SECRET_KEY").is_err() {
        std::env::set_var("SECRET_KEY", "test-secret");
    }
    if std::env::var("DATABASE_URL").is_err() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");
    }
    UserService::with_dependencies(store.clone())
}

fn sign_up_model(username: &str) -> SignUpModel {
    SignUpModel {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "hunter22".to_string(),
    }
}

#[tokio::test]
async fn sign_up_issues_a_decodable_token() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);

    let (token, user) = svc.sign_up(sign_up_model("alice")).await.unwrap();
    assert_eq!(user.username, "alice");

    let claims = Claims::decode(&token, ENV.jwt_secret.as_ref()).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn sign_up_rejects_taken_username_and_email() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);

    svc.sign_up(sign_up_model("alice")).await.unwrap();

    let err = svc.sign_up(sign_up_model("alice")).await.unwrap_err();
    match err {
        SystemError::Conflict(msg) => assert_eq!(msg, "Username already exists"),
        other => panic!("expected conflict, got {other:?}"),
    }

    let same_email = SignUpModel {
        username: "alice2".to_string(),
        email: "alice@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let err = svc.sign_up(same_email).await.unwrap_err();
    match err {
        SystemError::Conflict(msg) => assert_eq!(msg, "Email already exists"),
        other => panic!("expected conflict, got {other:?}"),
    }

    assert_eq!(store.users.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn sign_in_accepts_username_or_email() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    svc.sign_up(sign_up_model("alice")).await.unwrap();

    let by_username = SignInModel { login: "alice".to_string(), password: "hunter22".to_string() };
    let (_, user) = svc.sign_in(by_username).await.unwrap();
    assert_eq!(user.username, "alice");

    let by_email =
        SignInModel { login: "alice@example.com".to_string(), password: "hunter22".to_string() };
    svc.sign_in(by_email).await.unwrap();
}

#[tokio::test]
async fn sign_in_failures_are_indistinguishable() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    svc.sign_up(sign_up_model("alice")).await.unwrap();

    let wrong_password =
        SignInModel { login: "alice".to_string(), password: "wrong-pass".to_string() };
    let err = svc.sign_in(wrong_password).await.unwrap_err();
    let wrong_password_msg = match err {
        SystemError::Unauthorized(msg) => msg,
        other => panic!("expected unauthorized, got {other:?}"),
    };

    let unknown_user =
        SignInModel { login: "nobody".to_string(), password: "hunter22".to_string() };
    let err = svc.sign_in(unknown_user).await.unwrap_err();
    let unknown_user_msg = match err {
        SystemError::Unauthorized(msg) => msg,
        other => panic!("expected unauthorized, got {other:?}"),
    };

    assert_eq!(wrong_password_msg, unknown_user_msg);
}

#[tokio::test]
async fn get_by_id_surfaces_not_found() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let found = svc.get_by_id(alice.id).await.unwrap();
    assert_eq!(found.username, "alice");

    let err = svc.get_by_id(uuid::Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, SystemError::NotFound(_)));
}

#[tokio::test]
async fn empty_profile_patch_is_rejected() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let empty = UpdateProfileModel { username: None, email: None, avatar_url: None, bio: None };
    let err = svc.update_profile(alice.id, empty).await.unwrap_err();
    assert!(matches!(err, SystemError::BadRequest(_)));
}

#[tokio::test]
async fn profile_updates_apply_and_can_clear_optional_fields() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let patch = UpdateProfileModel {
        username: None,
        email: None,
        avatar_url: Some(Some("https://cdn.example.com/a.png".to_string())),
        bio: Some(Some("hello".to_string())),
    };
    let updated = svc.update_profile(alice.id, patch).await.unwrap();
    assert_eq!(updated.bio.as_deref(), Some("hello"));
    assert!(updated.avatar_url.is_some());

    let clearing = UpdateProfileModel {
        username: Some("alice_v2".to_string()),
        email: None,
        avatar_url: None,
        bio: Some(None),
    };
    let updated = svc.update_profile(alice.id, clearing).await.unwrap();
    assert_eq!(updated.username, "alice_v2");
    assert!(updated.bio.is_none());
    // Untouched fields keep their value.
    assert!(updated.avatar_url.is_some());
}

#[tokio::test]
async fn json_null_clears_a_field_while_absence_keeps_it() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");

    let seed: UpdateProfileModel = serde_json::from_str(
        r#"{"bio": "hello", "avatar_url": "https://cdn.example.com/a.png"}"#,
    )
    .unwrap();
    svc.update_profile(alice.id, seed).await.unwrap();

    let patch: UpdateProfileModel = serde_json::from_str(r#"{"bio": null}"#).unwrap();
    assert_eq!(patch.bio, Some(None));
    assert!(patch.avatar_url.is_none());

    let updated = svc.update_profile(alice.id, patch).await.unwrap();
    assert!(updated.bio.is_none());
    // The omitted field is untouched.
    assert!(updated.avatar_url.is_some());
}

#[tokio::test]
async fn profile_updates_reject_identifiers_taken_by_others() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let alice = store.add_user("alice");
    store.add_user("bob");

    let taken_username = UpdateProfileModel {
        username: Some("bob".to_string()),
        email: None,
        avatar_url: None,
        bio: None,
    };
    let err = svc.update_profile(alice.id, taken_username).await.unwrap_err();
    assert!(matches!(err, SystemError::Conflict(_)));

    let taken_email = UpdateProfileModel {
        username: None,
        email: Some("bob@example.com".to_string()),
        avatar_url: None,
        bio: None,
    };
    let err = svc.update_profile(alice.id, taken_email).await.unwrap_err();
    assert!(matches!(err, SystemError::Conflict(_)));

    // Re-submitting your own identifiers is not a conflict.
    let own_username = UpdateProfileModel {
        username: Some("alice".to_string()),
        email: None,
        avatar_url: None,
        bio: None,
    };
    svc.update_profile(alice.id, own_username).await.unwrap();
}

#[tokio::test]
async fn password_change_requires_the_current_password() {
    let store = Arc::new(MockStore::new());
    let svc = service(&store);
    let (_, user) = svc.sign_up(sign_up_model("alice")).await.unwrap();

    let wrong = UpdatePasswordModel {
        current_password: "not-the-one".to_string(),
        new_password: "new-secret".to_string(),
    };
    let err = svc.update_password(user.id, wrong).await.unwrap_err();
    assert!(matches!(err, SystemError::Unauthorized(_)));

    let right = UpdatePasswordModel {
        current_password: "hunter22".to_string(),
        new_password: "new-secret".to_string(),
    };
    svc.update_password(user.id, right).await.unwrap();

    let old = SignInModel { login: "alice".to_string(), password: "hunter22".to_string() };
    assert!(svc.sign_in(old).await.is_err());

    let new = SignInModel { login: "alice".to_string(), password: "new-secret".to_string() };
    svc.sign_in(new).await.unwrap();
}
