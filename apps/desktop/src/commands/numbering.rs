//! # Numbering Commands
//!
//! Choosing who prepared the order, and committing it for print.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit_and_print()                                                     │
//! │                                                                         │
//! │  ┌─ form lock held ──────────────────────────────────────────────┐     │
//! │  │  1. counters[preparer] += 1   (day reset first if stale)      │     │
//! │  │  2. number = V-<today>-<NN>                                   │     │
//! │  │  3. save counters              ◄── must succeed, else no print │     │
//! │  │  4. save draft                                                │     │
//! │  │  5. build both print copies                                   │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │  6. sleep(print_delay)                                                  │
//! │  7. printer.print(job)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, error, info};

use crate::commands::editor::{save_draft, EditorSnapshot};
use crate::commands::print::PrintJob;
use crate::error::ApiError;
use crate::platform::PlatformState;
use crate::state::{ConfigState, DbState, FormState};

/// Result of a commit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    /// The number printed, e.g. `V-20250131-03`.
    pub number: String,
    pub sequence: u32,
    pub editor: EditorSnapshot,
}

/// Switches the active preparer.
///
/// The visible number is re-rendered from that preparer's counter. No
/// counter changes.
pub async fn set_preparer(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    platform: &PlatformState,
    preparer: String,
) -> Result<EditorSnapshot, ApiError> {
    debug!(preparer = %preparer, "set_preparer command");
    let mut form = form.lock().await;
    form.set_preparer(&preparer, platform.today())?;

    db.inner().preferences().save_preparer(form.preparer()).await?;
    save_draft(db, &form).await?;
    Ok(EditorSnapshot::from_form(&form, config))
}

/// Advances the active preparer's counter and prints both copies.
///
/// The counter is on disk before the print facility is called. If the save
/// fails nothing is printed; the in-memory counter has still advanced and
/// the next successful save stores it.
pub async fn commit_and_print(
    db: &DbState,
    form: &FormState,
    config: &ConfigState,
    platform: &PlatformState,
) -> Result<CommitResponse, ApiError> {
    let today = platform.today();

    let (response, job) = {
        let mut form = form.lock().await;
        let number = form.commit(today);

        if let Err(e) = db.inner().sequences().save(form.registry().state()).await {
            error!(number = %number, "Counter not saved, print cancelled");
            return Err(e.into());
        }
        save_draft(db, &form).await?;

        let job = PrintJob::from_form(&form, config);
        let response = CommitResponse {
            number: number.to_string(),
            sequence: number.sequence,
            editor: EditorSnapshot::from_form(&form, config),
        };
        (response, job)
    };

    tokio::time::sleep(config.print_delay()).await;

    platform.printer().print(&job)?;
    info!(number = %response.number, "Printed");

    Ok(response)
}
