//! # State Module
//!
//! Manages application state for the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │  FormState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Database    │  │  Arc<Mutex<  │  │  company_name    │              │
//! │  │  (SQLite     │  │    Form      │  │  preparers       │              │
//! │  │   pool)      │  │  >>          │  │  print_delay_ms  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • FormState: tokio Mutex, held across saves                           │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod form;

pub use config::{ConfigState, DEFAULT_COMPANY_NAME};
pub use db::DbState;
pub use form::{Form, FormState, StoredForm};
