//! # Preferences Repository
//!
//! The last selected preparer and tax mode. Both are stored as plain text,
//! not JSON, so values written by older versions of the form still load.

use tracing::{debug, warn};

use orden_core::types::{PreparerId, TaxMode};

use super::keys;
use super::kv::KvStore;
use crate::error::DbResult;

/// Repository for UI preferences.
#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    kv: KvStore,
}

impl PreferencesRepository {
    /// Creates a new PreferencesRepository.
    pub fn new(kv: KvStore) -> Self {
        PreferencesRepository { kv }
    }

    /// The saved preparer id, unchecked against any roster.
    pub async fn load_preparer(&self) -> DbResult<Option<String>> {
        let raw = self.kv.get_raw(keys::PREPARER).await?;
        Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
    }

    pub async fn save_preparer(&self, preparer: &PreparerId) -> DbResult<()> {
        debug!(preparer = %preparer, "Saving preparer");
        self.kv.set_raw(keys::PREPARER, preparer.as_str()).await
    }

    /// The saved tax mode. Unknown tokens read as `None`.
    pub async fn load_tax_mode(&self) -> DbResult<Option<TaxMode>> {
        let Some(raw) = self.kv.get_raw(keys::TAX_MODE).await? else {
            return Ok(None);
        };
        match raw.parse::<TaxMode>() {
            Ok(mode) => Ok(Some(mode)),
            Err(e) => {
                warn!(value = %raw, error = %e, "Ignoring unknown tax mode");
                Ok(None)
            }
        }
    }

    pub async fn save_tax_mode(&self, mode: TaxMode) -> DbResult<()> {
        debug!(mode = %mode, "Saving tax mode");
        self.kv.set_raw(keys::TAX_MODE, mode.token()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_preparer_round_trip() {
        let db = db().await;
        let prefs = db.preferences();
        assert_eq!(prefs.load_preparer().await.unwrap(), None);

        prefs.save_preparer(&PreparerId::new("Pepo")).await.unwrap();
        assert_eq!(prefs.load_preparer().await.unwrap().as_deref(), Some("Pepo"));
    }

    #[tokio::test]
    async fn test_tax_mode_round_trip() {
        let db = db().await;
        let prefs = db.preferences();
        prefs.save_tax_mode(TaxMode::Half).await.unwrap();
        assert_eq!(prefs.load_tax_mode().await.unwrap(), Some(TaxMode::Half));
    }

    #[tokio::test]
    async fn test_legacy_and_unknown_mode_tokens() {
        let db = db().await;
        db.kv().set_raw(keys::TAX_MODE, "con").await.unwrap();
        assert_eq!(db.preferences().load_tax_mode().await.unwrap(), Some(TaxMode::Full));

        db.kv().set_raw(keys::TAX_MODE, "iva27").await.unwrap();
        assert_eq!(db.preferences().load_tax_mode().await.unwrap(), None);
    }
}
