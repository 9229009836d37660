//! Integration tests for local accounts over an on-disk store

use std::time::Duration;

use legalis::auth::{Plan, SessionManager, StoredUser};
use legalis::error::LegalisError;
use legalis::storage::{keys, KeyValueStore, SledStore};

mod common;

fn sessions(store: std::sync::Arc<SledStore>) -> SessionManager {
    SessionManager::with_latency(store, Duration::ZERO, Duration::ZERO)
}

#[tokio::test]
async fn test_session_survives_reopening_store() {
    let (store, dir) = common::create_temp_store();
    let created = sessions(store.clone())
        .signup("Grace Hopper", "grace@example.com", "cobol")
        .await
        .unwrap();
    drop(store);

    let reopened = SledStore::new_with_path(dir.path().join("store.db")).unwrap();
    let manager = SessionManager::with_latency(
        std::sync::Arc::new(reopened),
        Duration::ZERO,
        Duration::ZERO,
    );
    let current = manager.current_user().unwrap();
    assert_eq!(current, created);
    assert_eq!(current.plan, Plan::Free);
}

#[tokio::test]
async fn test_user_table_never_holds_plaintext_password() {
    let (store, _dir) = common::create_temp_store();
    sessions(store.clone())
        .signup("Grace", "grace@example.com", "cobol-rules")
        .await
        .unwrap();

    let raw = store.get(keys::USERS).unwrap().unwrap();
    assert!(!raw.contains("cobol-rules"));
    let users: Vec<StoredUser> = serde_json::from_str(&raw).unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "grace@example.com");

    let session = store.get(keys::SESSION).unwrap().unwrap();
    assert!(!session.contains("passwordHash"));
    assert!(!session.contains("salt"));
}

#[tokio::test]
async fn test_login_after_logout_and_wrong_password() {
    let (store, _dir) = common::create_temp_store();
    let manager = sessions(store.clone());
    let created = manager
        .signup("Grace", "grace@example.com", "cobol")
        .await
        .unwrap();
    manager.logout().unwrap();
    assert!(manager.current_user().is_none());

    let err = manager
        .login("grace@example.com", "fortran")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LegalisError>(),
        Some(LegalisError::Authentication(_))
    ));
    assert!(store.get(keys::SESSION).unwrap().is_none());

    let user = manager.login("Grace@Example.com", "cobol").await.unwrap();
    assert_eq!(user, created);
}

#[tokio::test]
async fn test_two_accounts_and_duplicate_rejected() {
    let (store, _dir) = common::create_temp_store();
    let manager = sessions(store);
    manager.signup("Ada", "ada@example.com", "a").await.unwrap();
    manager.signup("Bob", "bob@example.com", "b").await.unwrap();
    assert_eq!(manager.current_user().unwrap().name, "Bob");

    let err = manager
        .signup("Ada Again", "ADA@EXAMPLE.COM", "c")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LegalisError>(),
        Some(LegalisError::Validation(_))
    ));

    let user = manager.login("ada@example.com", "a").await.unwrap();
    assert_eq!(user.name, "Ada");
}
