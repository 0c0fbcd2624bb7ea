//! # Draft Repository
//!
//! The document being edited, saved after every change so a restart picks
//! up where the user left off.

use tracing::debug;

use orden_core::document::{DraftRecord, OrderDocument};

use super::keys;
use super::kv::KvStore;
use crate::error::DbResult;

/// Repository for the draft document.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    kv: KvStore,
}

impl DraftRepository {
    /// Creates a new DraftRepository.
    pub fn new(kv: KvStore) -> Self {
        DraftRepository { kv }
    }

    /// The stored draft, if present and well-formed.
    ///
    /// Fields missing from the stored JSON come back as `None`; the caller
    /// merges the record over a fresh document.
    pub async fn load(&self) -> DbResult<Option<DraftRecord>> {
        self.kv.get_json(keys::DRAFT).await
    }

    /// Stores the full document.
    pub async fn save(&self, doc: &OrderDocument) -> DbResult<()> {
        debug!(number = %doc.number, items = doc.items.len(), "Saving draft");
        self.kv.set_json(keys::DRAFT, doc).await
    }
}
