//! # Key-Value Store
//!
//! The single `kv_store` table every record lives in.
//!
//! ## Read Policy
//! ```text
//! get_json(key)
//!   ├── no row             → Ok(None)
//!   ├── row, valid JSON    → Ok(Some(value))
//!   ├── row, bad JSON      → warn!, Ok(None)      (treated as absent)
//!   └── SQLite failure     → Err(DbError)
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Repository over the `kv_store` table.
#[derive(Debug, Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    /// Creates a new KvStore.
    pub fn new(pool: SqlitePool) -> Self {
        KvStore { pool }
    }

    /// Reads the raw text stored under `key`.
    pub async fn get_raw(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    /// Writes raw text under `key`, replacing any previous value.
    pub async fn set_raw(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Saving record");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads and decodes a JSON record. Malformed records read as `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = %key, error = %e, "Ignoring malformed stored record");
                Ok(None)
            }
        }
    }

    /// Encodes `value` as JSON and stores it under `key`.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;
        self.set_raw(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    async fn store() -> KvStore {
        Database::new(DbConfig::in_memory()).await.unwrap().kv()
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let kv = store().await;
        assert_eq!(kv.get_raw("nope").await.unwrap(), None);
        assert_eq!(kv.get_json::<Sample>("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let kv = store().await;
        kv.set_json("sample", &Sample { n: 1 }).await.unwrap();
        kv.set_json("sample", &Sample { n: 2 }).await.unwrap();
        assert_eq!(kv.get_json("sample").await.unwrap(), Some(Sample { n: 2 }));
    }

    #[tokio::test]
    async fn test_malformed_json_reads_as_absent() {
        let kv = store().await;
        kv.set_raw("sample", "{not json").await.unwrap();
        assert_eq!(kv.get_json::<Sample>("sample").await.unwrap(), None);

        kv.set_raw("sample", r#"{"m":1}"#).await.unwrap();
        assert_eq!(kv.get_json::<Sample>("sample").await.unwrap(), None);
    }
}
