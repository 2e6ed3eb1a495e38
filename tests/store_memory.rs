mod common;

use shortlinks::domain::entities::Resolution;
use shortlinks::domain::repositories::{InsertOutcome, LinkStore};
use shortlinks::error::StoreError;
use shortlinks::infrastructure::persistence::MemoryStore;

#[tokio::test]
async fn test_insert_and_resolve_active() {
    let store = MemoryStore::new();
    common::seed(&store, "abc123", "https://a.example", 1).await;

    let resolution = store.resolve("abc123").await.unwrap();
    assert_eq!(resolution, Resolution::Active("https://a.example".to_string()));
}

#[tokio::test]
async fn test_resolve_unknown_code_is_missing() {
    let store = MemoryStore::new();
    assert_eq!(store.resolve("nosuch").await.unwrap(), Resolution::Missing);
}

#[tokio::test]
async fn test_same_url_dedups_to_first_code() {
    let store = MemoryStore::new();
    common::seed(&store, "abc123", "https://a.example", 1).await;

    let outcome = store
        .try_insert("def456", "https://a.example", 1)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InsertOutcome::Existing {
            code: "abc123".to_string()
        }
    );
    // No second record was written.
    assert_eq!(store.resolve("def456").await.unwrap(), Resolution::Missing);
}

#[tokio::test]
async fn test_occupied_code_collides_for_different_url() {
    let store = MemoryStore::new();
    common::seed(&store, "abc123", "https://a.example", 1).await;

    let err = store
        .try_insert("abc123", "https://b.example", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::CodeCollision { code } if code == "abc123"));
}

#[tokio::test]
async fn test_list_by_owner_filters_ownership() {
    let store = MemoryStore::new();
    common::seed(&store, "one111", "https://one.example", 1).await;
    common::seed(&store, "two222", "https://two.example", 1).await;
    common::seed(&store, "oth333", "https://other.example", 2).await;

    let links = store.list_by_owner(1).await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links["one111"], "https://one.example");
    assert_eq!(links["two222"], "https://two.example");
}

#[tokio::test]
async fn test_list_by_owner_without_records_is_empty() {
    let store = MemoryStore::new();
    assert!(store.list_by_owner(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_soft_delete_is_terminal() {
    let store = MemoryStore::new();
    common::seed(&store, "abc123", "https://a.example", 1).await;

    store
        .soft_delete(&["abc123".to_string()], 1)
        .await
        .unwrap();

    assert_eq!(store.resolve("abc123").await.unwrap(), Resolution::Gone);
    assert!(store.list_by_owner(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_soft_delete_skips_foreign_codes() {
    let store = MemoryStore::new();
    common::seed(&store, "abc123", "https://a.example", 1).await;

    store
        .soft_delete(&["abc123".to_string()], 2)
        .await
        .unwrap();

    assert_eq!(
        store.resolve("abc123").await.unwrap(),
        Resolution::Active("https://a.example".to_string())
    );
}

#[tokio::test]
async fn test_soft_delete_unknown_codes_is_a_no_op() {
    let store = MemoryStore::new();
    store
        .soft_delete(&["nosuch".to_string()], 1)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deleted_slot_stays_occupied() {
    let store = MemoryStore::new();
    common::seed_deleted(&store, "abc123", "https://a.example", 1).await;

    let err = store
        .try_insert("abc123", "https://b.example", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::CodeCollision { .. }));
}

#[tokio::test]
async fn test_deleted_url_can_be_shortened_again() {
    let store = MemoryStore::new();
    common::seed_deleted(&store, "abc123", "https://a.example", 1).await;

    let outcome = store
        .try_insert("def456", "https://a.example", 1)
        .await
        .unwrap();

    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(
        store.resolve("def456").await.unwrap(),
        Resolution::Active("https://a.example".to_string())
    );
    // The tombstone is untouched.
    assert_eq!(store.resolve("abc123").await.unwrap(), Resolution::Gone);
}

#[tokio::test]
async fn test_active_codes_stay_unique_under_concurrent_inserts() {
    use std::sync::Arc;

    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();

    // Everyone races to claim the same code for different URLs.
    for i in 0..16i64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .try_insert("race01", &format!("https://u{i}.example"), i)
                .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            wins += 1;
        }
    }

    assert_eq!(wins, 1);
}

#[tokio::test]
async fn test_concurrent_same_url_yields_one_canonical_code() {
    use std::collections::HashSet;
    use std::sync::Arc;

    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();

    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .try_insert(&format!("cand{i:02}"), "https://same.example", 0)
                .await
                .unwrap()
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        match handle.await.unwrap() {
            InsertOutcome::Existing { code } => {
                codes.insert(code);
            }
            InsertOutcome::Inserted => {}
        }
    }

    // Every dedup hit reported the same canonical code.
    assert!(codes.len() <= 1);
    assert_eq!(store.list_by_owner(0).await.unwrap().len(), 1);
}
