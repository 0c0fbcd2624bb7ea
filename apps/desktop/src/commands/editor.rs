//! # Editor Commands
//!
//! Header and item edits, the editor snapshot, and clearing the form.
//!
//! ## Editing Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Fresh   │────►│ Editing  │────►│ Commit + │────►│ Editing  │       │
//! │  │ document │     │          │     │  print   │     │ (same    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     │  doc)    │       │
//! │       ▲                │           (numbering.rs)   └──────────┘       │
//! │       │           add_item                               │             │
//! │       │           update_item                            │             │
//! │       │           set_header                             │             │
//! │       │                │                                 │             │
//! │       └──── clear_form ◄─────────────────────────────────┘             │
//! │             (asks first)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit saves the draft before returning.

use serde::Serialize;
use tracing::{debug, info};

use orden_core::document::{HeaderField, ItemPatch, OrderDocument};
use orden_core::format::{format_currency, mode_label, mode_short_label};
use orden_core::money::Money;
use orden_core::pricing::Subtotal;
use orden_core::types::{PreparerId, TaxMode};

use crate::error::ApiError;
use crate::platform::PlatformState;
use crate::state::{ConfigState, DbState, Form, FormState};

/// Prompt shown before clearing the form.
pub const CLEAR_PROMPT: &str = "¿Vaciar todos los campos?";

// =============================================================================
// Responses
// =============================================================================

/// Per-row values the editor shows next to the stored document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorRow {
    pub id: String,
    /// Stored net price projected into the current mode.
    pub display_price: Option<Money>,
}

/// Everything the editor renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub company_name: String,
    pub document: OrderDocument,
    pub rows: Vec<EditorRow>,
    pub subtotal: Subtotal,
    /// `$ 1.234,50`
    pub subtotal_formatted: String,
    pub mode: TaxMode,
    /// `Con IVA 21%`
    pub mode_label: String,
    /// `(c/IVA 21%)`
    pub price_label: String,
    pub preparer: PreparerId,
    pub preparers: Vec<PreparerId>,
}

impl EditorSnapshot {
    pub fn from_form(form: &Form, config: &ConfigState) -> Self {
        let converter = form.converter();
        let document = form.document().clone();
        let rows = document
            .items
            .iter()
            .map(|item| EditorRow {
                id: item.id.clone(),
                display_price: converter.to_display(item.net_price),
            })
            .collect();
        let subtotal = converter.subtotal(&document.items);

        EditorSnapshot {
            company_name: config.company_name.clone(),
            rows,
            subtotal_formatted: format_currency(subtotal.display),
            subtotal,
            mode: form.mode(),
            mode_label: mode_label(form.mode()).to_string(),
            price_label: mode_short_label(form.mode()).to_string(),
            preparer: form.preparer().clone(),
            preparers: form.roster().preparers().to_vec(),
            document,
        }
    }
}

/// Result of a clear request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    /// False when the user declined.
    pub cleared: bool,
    pub editor: EditorSnapshot,
}

pub(crate) async fn save_draft(db: &DbState, form: &Form) -> Result<(), ApiError> {
    db.inner().drafts().save(form.document()).await?;
    Ok(())
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current editor state.
///
/// If the calendar day changed since the number was last shown, the number
/// is re-rendered for the new day and the draft saved.
pub async fn get_editor(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    platform: &PlatformState,
) -> Result<EditorSnapshot, ApiError> {
    debug!("get_editor command");
    let mut form = form.lock().await;
    if form.roll_day(platform.today()) {
        save_draft(db, &form).await?;
    }
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Appends an empty row.
pub async fn add_item(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
) -> Result<EditorSnapshot, ApiError> {
    let mut form = form.lock().await;
    let id = form.document_mut().add_item();
    debug!(item_id = %id, "add_item command");

    save_draft(db, &form).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Removes a row. The list may become empty.
pub async fn remove_item(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    item_id: String,
) -> Result<EditorSnapshot, ApiError> {
    debug!(item_id = %item_id, "remove_item command");
    let mut form = form.lock().await;
    form.document_mut().remove_item(&item_id)?;

    save_draft(db, &form).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Applies typed field values to a row.
///
/// `patch.price` is read in the current mode's terms and stored net.
pub async fn update_item(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    item_id: String,
    patch: ItemPatch,
) -> Result<EditorSnapshot, ApiError> {
    debug!(item_id = %item_id, "update_item command");
    let mut form = form.lock().await;
    let converter = form.converter();
    form.document_mut()
        .update_item(&item_id, patch, &converter)?;

    save_draft(db, &form).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Sets a header field (number, client, dates, notes).
///
/// A typed number is kept as-is until the next preparer change, commit or
/// clear; the counters are not touched.
pub async fn set_header(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    field: HeaderField,
) -> Result<EditorSnapshot, ApiError> {
    debug!(?field, "set_header command");
    let mut form = form.lock().await;
    form.document_mut().set_header(field)?;

    save_draft(db, &form).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Empties the form after asking the user.
///
/// ## Behavior
/// - Declined: nothing changes
/// - Accepted: fresh document (one empty row, dates today), numbered from
///   the active preparer's current counter, which is NOT incremented
pub async fn clear_form(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    platform: &PlatformState,
) -> Result<ClearResponse, ApiError> {
    // Ask before locking; the prompt may block on the user
    if !platform.confirm(CLEAR_PROMPT) {
        debug!("clear_form declined");
        let editor = form
            .with_form(|f| EditorSnapshot::from_form(f, config))
            .await;
        return Ok(ClearResponse {
            cleared: false,
            editor,
        });
    }

    let mut form = form.lock().await;
    form.clear(platform.today());
    info!(number = %form.document().number, "Form cleared");

    save_draft(db, &form).await?;
    Ok(ClearResponse {
        cleared: true,
        editor: EditorSnapshot::from_form(&form, config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{harness, harness_with_db, Harness};

    #[tokio::test]
    async fn test_edits_are_saved_as_draft() {
        let Harness {
            db, form, config, ..
        } = harness().await;

        let editor = add_item(&db, &form, &config).await.unwrap();
        assert_eq!(editor.document.items.len(), 2);

        let id = editor.document.items[0].id.clone();
        update_item(
            &db,
            &form,
            &config,
            id,
            ItemPatch {
                units: Some("2".to_string()),
                price: Some("50".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        set_header(&db, &form, &config, HeaderField::Client("ACME".to_string()))
            .await
            .unwrap();

        let draft = db.inner().drafts().load().await.unwrap().unwrap();
        assert_eq!(draft.client.as_deref(), Some("ACME"));
        assert_eq!(draft.items.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_projects_prices() {
        let Harness {
            db, form, config, ..
        } = harness().await;
        let id = form.with_form(|f| f.document().items[0].id.clone()).await;

        form.lock().await.set_mode(TaxMode::Half);
        let editor = update_item(
            &db,
            &form,
            &config,
            id,
            ItemPatch {
                units: Some("1".to_string()),
                price: Some("110,5".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(editor.document.items[0].net_price, Money::parse("100"));
        assert_eq!(editor.rows[0].display_price, Money::parse("110.5"));
        assert_eq!(editor.subtotal_formatted, "$ 110,50");
        assert_eq!(editor.mode_label, "Con IVA 10,5%");
        assert_eq!(editor.company_name, "HIMETAL S.A.");
    }

    #[tokio::test]
    async fn test_overflowing_row_is_rejected_and_not_saved() {
        let h = harness().await;
        let id = h.form.with_form(|f| f.document().items[0].id.clone()).await;

        let err = update_item(
            &h.db,
            &h.form,
            &h.config,
            id,
            ItemPatch {
                units: Some("100000000000000000000".to_string()),
                price: Some("100000000000000000000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(h.db.inner().drafts().load().await.unwrap().is_none());

        let editor = get_editor(&h.db, &h.form, &h.config, &h.platform).await.unwrap();
        assert!(editor.document.items[0].is_blank());
        assert!(editor.subtotal.net.is_zero());
    }

    #[tokio::test]
    async fn test_oversized_saved_draft_still_loads() {
        let db = orden_db::Database::new(orden_db::DbConfig::in_memory())
            .await
            .unwrap();
        db.kv()
            .set_raw(
                orden_db::repository::keys::DRAFT,
                r#"{"items":[{"units":"100000000000000000000","netPrice":"100000000000000000000"}]}"#,
            )
            .await
            .unwrap();
        let h = harness_with_db(db).await;

        let editor = get_editor(&h.db, &h.form, &h.config, &h.platform).await.unwrap();
        assert!(editor.subtotal.net > Money::parse("1e28").unwrap());

        h.confirm.answer(false);
        let response = clear_form(&h.db, &h.form, &h.config, &h.platform).await.unwrap();
        assert!(!response.cleared);
    }

    #[tokio::test]
    async fn test_remove_unknown_item() {
        let Harness {
            db, form, config, ..
        } = harness().await;
        let err = remove_item(&db, &form, &config, "missing".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_declined_clear_leaves_document() {
        let h = harness().await;
        set_header(&h.db, &h.form, &h.config, HeaderField::Client("ACME".to_string()))
            .await
            .unwrap();

        h.confirm.answer(false);
        let response = clear_form(&h.db, &h.form, &h.config, &h.platform).await.unwrap();

        assert!(!response.cleared);
        assert_eq!(response.editor.document.client, "ACME");
        assert_eq!(h.confirm.asked(), vec![CLEAR_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_clear_resets_to_one_empty_row() {
        let h = harness().await;
        add_item(&h.db, &h.form, &h.config).await.unwrap();
        set_header(&h.db, &h.form, &h.config, HeaderField::Notes("urgente".to_string()))
            .await
            .unwrap();

        let response = clear_form(&h.db, &h.form, &h.config, &h.platform).await.unwrap();

        assert!(response.cleared);
        let doc = &response.editor.document;
        assert_eq!(doc.items.len(), 1);
        assert!(doc.notes.is_empty());
        assert_eq!(doc.number, "V-20250131-00");
        assert_eq!(doc.order_date, "2025-01-31");

        let draft = h.db.inner().drafts().load().await.unwrap().unwrap();
        assert_eq!(draft.notes.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_get_editor_rolls_day() {
        let h = harness().await;
        h.clock.set(chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());

        let editor = get_editor(&h.db, &h.form, &h.config, &h.platform).await.unwrap();
        assert_eq!(editor.document.number, "V-20250201-00");
    }
}
