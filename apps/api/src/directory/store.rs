//! Document-store backends for the provider directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};

use crate::models::{Provider, UserProfile};

/// Raw access to the `providers` and `users` collections.
///
/// Implementations report failures; the degrade policy lives in `Directory`.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Full scan of the `providers` collection.
    async fn list_providers(&self) -> Result<Vec<Provider>>;

    /// By-id lookup in the `providers` collection.
    async fn get_provider(&self, id: &str) -> Result<Option<Provider>>;

    /// Inserts the profile unless a record for `uid` already exists.
    /// Returns `true` when a record was created.
    async fn insert_user_if_absent(&self, profile: &UserProfile) -> Result<bool>;
}

#[derive(Debug, FromRow)]
struct ProviderDocRow {
    id: String,
    doc: Value,
}

impl ProviderDocRow {
    /// Malformed documents are skipped so one bad record doesn't blank the directory.
    fn into_provider(self) -> Option<Provider> {
        match Provider::from_document(&self.id, self.doc) {
            Ok(provider) => Some(provider),
            Err(e) => {
                warn!("Skipping malformed provider document {}: {e}", self.id);
                None
            }
        }
    }
}

/// PostgreSQL-backed store: one JSONB document per row.
///
/// ```sql
/// CREATE TABLE providers (id TEXT PRIMARY KEY, doc JSONB NOT NULL);
/// CREATE TABLE users (
///     uid TEXT PRIMARY KEY,
///     doc JSONB NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
/// );
/// ```
#[derive(Clone)]
pub struct PgDirectoryStore {
    pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn list_providers(&self) -> Result<Vec<Provider>> {
        let rows = sqlx::query_as::<_, ProviderDocRow>(
            "SELECT id, doc FROM providers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to scan providers")?;

        Ok(rows
            .into_iter()
            .filter_map(ProviderDocRow::into_provider)
            .collect())
    }

    async fn get_provider(&self, id: &str) -> Result<Option<Provider>> {
        let row = sqlx::query_as::<_, ProviderDocRow>("SELECT id, doc FROM providers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch provider {id}"))?;

        Ok(row.and_then(ProviderDocRow::into_provider))
    }

    async fn insert_user_if_absent(&self, profile: &UserProfile) -> Result<bool> {
        let doc = serde_json::to_value(profile)?;

        // Single statement: an existing record is never touched.
        let result = sqlx::query(
            r#"
            INSERT INTO users (uid, doc, created_at)
            VALUES ($1, $2, now())
            ON CONFLICT (uid) DO NOTHING
            "#,
        )
        .bind(&profile.uid)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to create user {}", profile.uid))?;

        let created = result.rows_affected() == 1;
        if created {
            info!("Created user profile {}", profile.uid);
        }
        Ok(created)
    }
}
