#![allow(dead_code)]

use shortlinks::domain::repositories::{InsertOutcome, LinkStore};

/// Inserts a record and asserts the slot was free.
pub async fn seed(store: &dyn LinkStore, code: &str, url: &str, owner_id: i64) {
    let outcome = store.try_insert(code, url, owner_id).await.unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted, "seed slot was not free");
}

/// Inserts a record and immediately soft-deletes it.
pub async fn seed_deleted(store: &dyn LinkStore, code: &str, url: &str, owner_id: i64) {
    seed(store, code, url, owner_id).await;
    store
        .soft_delete(&[code.to_string()], owner_id)
        .await
        .unwrap();
}
