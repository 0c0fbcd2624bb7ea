//! # orden-core: Pure Logic for Internal Work Orders
//!
//! Numbering, pricing and document rules for the internal work-order form,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Internal Work Orders                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │    Header ──► Item table ──► Mode / preparer toggles ──► Print  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orden-desktop (commands, state)                 │   │
//! │  │    set_preparer, set_tax_mode, update_item, commit_and_print    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orden-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ sequence  │  │  pricing  │  │ document  │  │   print   │  │   │
//! │  │   │ counters  │  │ net ↔ IVA │  │ items     │  │ 2 copies  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    orden-db (key-value store)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (TaxMode, PreparerId, DayKey, DocumentNumber)
//! - [`money`] - Decimal money
//! - [`sequence`] - Daily per-preparer counters and legacy migration
//! - [`pricing`] - Net ↔ displayed price conversion, subtotal
//! - [`document`] - The order being edited
//! - [`print`] - Internal and plant print projections
//! - [`format`] - es-AR formatting
//! - [`roster`] - Configured preparers
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use orden_core::pricing::PriceConverter;
//! use orden_core::types::TaxMode;
//!
//! // Typed 121 with 21% IVA is stored as 100 net
//! let net = PriceConverter::new(TaxMode::Full).to_net_from_input("121");
//!
//! // Switching to "no IVA" shows the stored net
//! let shown = PriceConverter::new(TaxMode::None).to_display(net);
//! assert_eq!(shown.unwrap().to_string(), "100.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod print;
pub mod roster;
pub mod sequence;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of every document number.
pub const DOCUMENT_PREFIX: &str = "V";

/// Minimum digits of the sequence part (`-03`). Larger values print in full.
pub const SEQUENCE_PAD: usize = 2;

/// Roster used when none is configured.
pub const DEFAULT_PREPARERS: [&str; 2] = ["Nacho", "Pepo"];

/// Pause between the commit and the print call, so the re-rendered number
/// reaches the printable view first.
pub const PRINT_SETTLE_DELAY_MS: u64 = 40;

/// Maximum length of single-line text fields.
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum length of the notes field.
pub const MAX_NOTES_LEN: usize = 2000;
