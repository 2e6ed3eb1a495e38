//! PostgreSQL backend tests. Require a database; run via `cargo sqlx test`
//! tooling or with `DATABASE_URL` pointing at a disposable server.

mod common;

use sqlx::PgPool;

use shortlinks::domain::entities::Resolution;
use shortlinks::domain::repositories::{InsertOutcome, LinkStore};
use shortlinks::error::StoreError;
use shortlinks::infrastructure::persistence::PgStore;

#[sqlx::test]
async fn test_insert_and_resolve_active(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed(&store, "abc123", "https://a.example", 1).await;

    let resolution = store.resolve("abc123").await.unwrap();
    assert_eq!(resolution, Resolution::Active("https://a.example".to_string()));
}

#[sqlx::test]
async fn test_resolve_unknown_code_is_missing(pool: PgPool) {
    let store = PgStore::new(pool);
    assert_eq!(store.resolve("nosuch").await.unwrap(), Resolution::Missing);
}

#[sqlx::test]
async fn test_same_url_dedups_to_first_code(pool: PgPool) {
    let store = PgStore::new(pool);
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
}

#[sqlx::test]
async fn test_occupied_code_collides_for_different_url(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed(&store, "abc123", "https://a.example", 1).await;

    let err = store
        .try_insert("abc123", "https://b.example", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::CodeCollision { code } if code == "abc123"));
}

#[sqlx::test]
async fn test_unique_index_race_is_treated_as_dedup(pool: PgPool) {
    // Simulate losing the check-then-insert race: the canonical row appears
    // between our dedup check and our insert. Inserting directly against the
    // table trips the partial unique index exactly like a concurrent writer.
    sqlx::query("INSERT INTO links (code, url, user_id) VALUES ($1, $2, $3)")
        .bind("winner")
        .bind("https://a.example")
        .bind(1i64)
        .execute(&pool)
        .await
        .unwrap();

    let store = PgStore::new(pool);
    let outcome = store
        .try_insert("loser1", "https://a.example", 2)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        InsertOutcome::Existing {
            code: "winner".to_string()
        }
    );
}

#[sqlx::test]
async fn test_list_by_owner_filters_ownership(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed(&store, "one111", "https://one.example", 1).await;
    common::seed(&store, "two222", "https://two.example", 1).await;
    common::seed(&store, "oth333", "https://other.example", 2).await;

    let links = store.list_by_owner(1).await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links["one111"], "https://one.example");
    assert_eq!(links["two222"], "https://two.example");
}

#[sqlx::test]
async fn test_soft_delete_is_terminal(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed(&store, "abc123", "https://a.example", 1).await;

    store
        .soft_delete(&["abc123".to_string()], 1)
        .await
        .unwrap();

    assert_eq!(store.resolve("abc123").await.unwrap(), Resolution::Gone);
    assert!(store.list_by_owner(1).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_soft_delete_batch_skips_foreign_codes(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed(&store, "mine01", "https://mine.example", 1).await;
    common::seed(&store, "your01", "https://yours.example", 2).await;

    store
        .soft_delete(&["mine01".to_string(), "your01".to_string()], 1)
        .await
        .unwrap();

    assert_eq!(store.resolve("mine01").await.unwrap(), Resolution::Gone);
    assert_eq!(
        store.resolve("your01").await.unwrap(),
        Resolution::Active("https://yours.example".to_string())
    );
}

#[sqlx::test]
async fn test_deleted_slot_stays_occupied(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed_deleted(&store, "abc123", "https://a.example", 1).await;

    let err = store
        .try_insert("abc123", "https://b.example", 1)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::CodeCollision { .. }));
}

#[sqlx::test]
async fn test_deleted_url_can_be_shortened_again(pool: PgPool) {
    let store = PgStore::new(pool);
    common::seed_deleted(&store, "abc123", "https://a.example", 1).await;

    let outcome = store
        .try_insert("def456", "https://a.example", 1)
        .await
        .unwrap();

    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(store.resolve("abc123").await.unwrap(), Resolution::Gone);
}
