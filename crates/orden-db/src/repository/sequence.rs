//! # Sequence Repository
//!
//! Persists the per-preparer daily counters and reads the legacy global
//! counter once for migration. The legacy record is never written.

use tracing::debug;

use orden_core::sequence::{LegacySequenceState, SequenceState};

use super::keys;
use super::kv::KvStore;
use crate::error::DbResult;

/// Repository for counter records.
#[derive(Debug, Clone)]
pub struct SequenceRepository {
    kv: KvStore,
}

impl SequenceRepository {
    /// Creates a new SequenceRepository.
    pub fn new(kv: KvStore) -> Self {
        SequenceRepository { kv }
    }

    /// The current-format record, if present and well-formed.
    pub async fn load_current(&self) -> DbResult<Option<SequenceState>> {
        self.kv.get_json(keys::SEQUENCE_BY_PREPARER).await
    }

    /// The legacy global counter, if present and well-formed.
    pub async fn load_legacy(&self) -> DbResult<Option<LegacySequenceState>> {
        self.kv.get_json(keys::LEGACY_SEQUENCE).await
    }

    /// Stores the counters. Must complete before anything is printed.
    pub async fn save(&self, state: &SequenceState) -> DbResult<()> {
        debug!(date = %state.date, preparers = state.counters.len(), "Saving counters");
        self.kv.set_json(keys::SEQUENCE_BY_PREPARER, state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::NaiveDate;
    use orden_core::types::DayKey;

    fn today() -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_current() {
        let db = db().await;
        let repo = db.sequences();
        assert_eq!(repo.load_current().await.unwrap(), None);

        let mut state = SequenceState::empty(today());
        state.counters.insert("Nacho".to_string(), 3);
        repo.save(&state).await.unwrap();

        assert_eq!(repo.load_current().await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn test_load_legacy_record() {
        let db = db().await;
        db.kv()
            .set_raw(keys::LEGACY_SEQUENCE, r#"{"date":"20250131","seq":7}"#)
            .await
            .unwrap();

        let legacy = db.sequences().load_legacy().await.unwrap().unwrap();
        assert_eq!(legacy.date, today());
        assert_eq!(legacy.seq, 7);
    }

    #[tokio::test]
    async fn test_bad_day_key_reads_as_absent() {
        let db = db().await;
        db.kv()
            .set_raw(keys::SEQUENCE_BY_PREPARER, r#"{"date":"2025-01-31","counters":{}}"#)
            .await
            .unwrap();
        db.kv()
            .set_raw(keys::LEGACY_SEQUENCE, r#"{"date":"20250131","seq":"siete"}"#)
            .await
            .unwrap();

        assert_eq!(db.sequences().load_current().await.unwrap(), None);
        assert_eq!(db.sequences().load_legacy().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_counters_field_defaults_empty() {
        let db = db().await;
        db.kv()
            .set_raw(keys::SEQUENCE_BY_PREPARER, r#"{"date":"20250131"}"#)
            .await
            .unwrap();

        let state = db.sequences().load_current().await.unwrap().unwrap();
        assert!(state.counters.is_empty());
    }
}
