//! # Print Commands
//!
//! Builds the two printable copies from the live form.

use serde::Serialize;
use tracing::debug;

use orden_core::print::PrintView;

use crate::state::{ConfigState, Form, FormState};

/// What the print facility receives: both copies, internal first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    pub company_name: String,
    pub views: Vec<PrintView>,
}

impl PrintJob {
    pub fn from_form(form: &Form, config: &ConfigState) -> Self {
        PrintJob {
            company_name: config.company_name.clone(),
            views: PrintView::project_both(form.document(), form.mode(), form.preparer()),
        }
    }
}

/// Gets both print copies for preview. Does not commit.
pub async fn get_print_views(form: &FormState, config: &ConfigState) -> PrintJob {
    debug!("get_print_views command");
    form.with_form(|f| PrintJob::from_form(f, config)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;
    use orden_core::print::PrintCopy;

    #[tokio::test]
    async fn test_preview_has_both_copies() {
        let h = harness().await;
        let job = get_print_views(&h.form, &h.config).await;

        assert_eq!(job.company_name, "HIMETAL S.A.");
        assert_eq!(job.views.len(), 2);
        assert_eq!(job.views[0].copy, PrintCopy::Internal);
        assert!(job.views[0].subtotal.is_some());
        assert_eq!(job.views[1].copy, PrintCopy::Plant);
        assert!(job.views[1].subtotal.is_none());
        assert_eq!(job.views[1].number, "V-20250131-00");
        assert!(h.printer.numbers().is_empty());
    }
}
