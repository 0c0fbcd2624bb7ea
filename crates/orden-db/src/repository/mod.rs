//! # Repository Module
//!
//! Typed access to the records the form persists.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell command                                                          │
//! │       │                                                                 │
//! │       │  db.sequences().save(&state)                                    │
//! │       ▼                                                                 │
//! │  SequenceRepository / DraftRepository / PreferencesRepository           │
//! │       │   (record type ↔ JSON, tolerant reads)                          │
//! │       ▼                                                                 │
//! │  KvStore  (one row per key in kv_store)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvStore`](kv::KvStore) - Raw key-value access
//! - [`SequenceRepository`](sequence::SequenceRepository) - Daily counters
//! - [`DraftRepository`](draft::DraftRepository) - Draft document
//! - [`PreferencesRepository`](preferences::PreferencesRepository) - Preparer and tax mode

pub mod draft;
pub mod kv;
pub mod preferences;
pub mod sequence;

/// Storage keys. Names are kept stable so existing stores keep loading.
pub mod keys {
    /// Legacy single global counter `{date, seq}`. Read-only.
    pub const LEGACY_SEQUENCE: &str = "ordenInternaPrintSeq";
    /// Per-preparer counters `{date, counters}`.
    pub const SEQUENCE_BY_PREPARER: &str = "ordenInternaPrintSeqByUser";
    /// Last selected preparer (plain text).
    pub const PREPARER: &str = "ordenInternaEstimador";
    /// The document being edited (JSON).
    pub const DRAFT: &str = "ordenInternaDraft";
    /// Last selected tax mode token (plain text).
    pub const TAX_MODE: &str = "ordenInternaIvaMode";
}
