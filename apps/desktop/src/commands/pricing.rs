//! # Pricing Commands
//!
//! Switching the tax mode. Stored net prices never change here; only the
//! projection the editor and the internal copy show.

use tracing::debug;

use orden_core::types::TaxMode;

use crate::commands::editor::EditorSnapshot;
use crate::error::ApiError;
use crate::state::{ConfigState, DbState, FormState};

/// Sets the tax mode from its token (`none`, `half`, `full`).
pub async fn set_tax_mode(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    mode: String,
) -> Result<EditorSnapshot, ApiError> {
    debug!(mode = %mode, "set_tax_mode command");
    let mode: TaxMode = mode.parse()?;

    let mut form = form.lock().await;
    form.set_mode(mode);

    db.inner().preferences().save_tax_mode(mode).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}
