//! # orden-db: Persistence Layer for the Work-Order Form
//!
//! Local SQLite storage for the form's records: daily counters, the draft
//! document, and the selected preparer and tax mode.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Work-Order Data Flow                             │
//! │                                                                         │
//! │  Shell command (commit_and_print)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     orden-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐    ┌─────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │    │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  SequenceRepo   │    │ (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  DraftRepo      │    │ 001_init    │  │   │
//! │  │   │               │    │  PreferencesRepo│    │             │  │   │
//! │  │   └───────────────┘    └─────────────────┘    └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: <data dir>/ordenes.db, table kv_store                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Typed record repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orden_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("ordenes.db")).await?;
//! let counters = db.sequences().load_current().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::draft::DraftRepository;
pub use repository::kv::KvStore;
pub use repository::preferences::PreferencesRepository;
pub use repository::sequence::SequenceRepository;
