//! PostgreSQL storage backend.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::domain::entities::Resolution;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::StoreError;

/// Relational backend; every operation is a direct statement against the
/// `links` table, with no in-memory cache.
///
/// The partial unique index on `url WHERE NOT is_deleted` is the ultimate
/// arbiter for dedup across concurrent writers and process instances: losing
/// that race is treated as a dedup hit, not a failure. The `code` primary key
/// keeps tombstone slots occupied forever.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects, sizes the pool, and applies pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("connected to database, migrations applied");

        Ok(Self::new(pool))
    }

    async fn find_code_for_url(&self, url: &str) -> Result<Option<String>, StoreError> {
        let code: Option<String> =
            sqlx::query_scalar("SELECT code FROM links WHERE url = $1 AND NOT is_deleted LIMIT 1")
                .bind(url)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::database("select code by url", e))?;
        Ok(code)
    }
}

#[async_trait]
impl LinkStore for PgStore {
    async fn resolve(&self, code: &str) -> Result<Resolution, StoreError> {
        let row = sqlx::query("SELECT url, is_deleted FROM links WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::database("select link by code", e))?;

        Ok(match row {
            None => Resolution::Missing,
            Some(row) if row.get::<bool, _>("is_deleted") => Resolution::Gone,
            Some(row) => Resolution::Active(row.get("url")),
        })
    }

    async fn try_insert(
        &self,
        code: &str,
        url: &str,
        owner_id: i64,
    ) -> Result<InsertOutcome, StoreError> {
        if let Some(existing) = self.find_code_for_url(url).await? {
            return Ok(InsertOutcome::Existing { code: existing });
        }

        let inserted = sqlx::query("INSERT INTO links (code, url, user_id) VALUES ($1, $2, $3)")
            .bind(code)
            .bind(url)
            .bind(owner_id)
            .execute(&self.pool)
            .await;

        match inserted {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) => {
                if let Some(db) = e.as_database_error()
                    && db.is_unique_violation()
                {
                    if db.constraint() == Some("links_pkey") {
                        return Err(StoreError::CodeCollision {
                            code: code.to_string(),
                        });
                    }

                    // Lost the dedup race to a concurrent writer; their record
                    // is canonical now.
                    if let Some(existing) = self.find_code_for_url(url).await? {
                        return Ok(InsertOutcome::Existing { code: existing });
                    }
                }

                Err(StoreError::database("insert link", e))
            }
        }
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<HashMap<String, String>, StoreError> {
        let rows =
            sqlx::query("SELECT code, url FROM links WHERE user_id = $1 AND NOT is_deleted")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::database("select links by owner", e))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("code"), row.get("url")))
            .collect())
    }

    async fn soft_delete(&self, codes: &[String], owner_id: i64) -> Result<(), StoreError> {
        // One transaction for the whole batch: it applies fully or not at all.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::database("begin delete transaction", e))?;

        sqlx::query("UPDATE links SET is_deleted = TRUE WHERE code = ANY($1) AND user_id = $2")
            .bind(codes)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::database("soft delete links", e))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::database("commit delete transaction", e))
    }
}
