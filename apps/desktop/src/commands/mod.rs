//! # Commands Module
//!
//! All commands exposed to the presentation layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── editor.rs     ◄─── Snapshot, header and item edits, clear
//! ├── numbering.rs  ◄─── Preparer selection, commit and print
//! ├── pricing.rs    ◄─── Tax mode
//! ├── print.rs      ◄─── Print copies
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation                                                           │
//! │  ────────────                                                           │
//! │  update_item(id, { price: "121" })                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust shell                                                             │
//! │  ──────────                                                             │
//! │  async fn update_item(                                                  │
//! │      db: &DbState,          ◄── Injected state                         │
//! │      form: &FormState,                                                  │
//! │      config: &ConfigState,                                              │
//! │      item_id: String,       ◄── From the caller                        │
//! │      patch: ItemPatch,                                                  │
//! │  ) -> Result<EditorSnapshot, ApiError>                                  │
//! │         │                                                               │
//! │         │ lock form → mutate → save → snapshot                          │
//! │         ▼                                                               │
//! │  Presentation receives: EditorSnapshot                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod config;
pub mod editor;
pub mod numbering;
pub mod pricing;
pub mod print;
