//! # Form State
//!
//! The single mutable aggregate behind every command: the document being
//! edited, the tax mode, the active preparer and the daily counters.
//!
//! ## Thread Safety
//! The form is wrapped in `Arc<tokio::sync::Mutex<T>>`. Commands hold the
//! guard across "mutate → save", so two commands never interleave their
//! writes and no increment is lost.
//!
//! ## Form Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form State Operations                                │
//! │                                                                         │
//! │  User Action              Command                 Form Change           │
//! │  ───────────              ───────                 ───────────           │
//! │                                                                         │
//! │  Pick preparer ──────────► set_preparer() ──────► preparer, number     │
//! │                                                                         │
//! │  Pick tax mode ──────────► set_tax_mode() ──────► mode (prices stay)   │
//! │                                                                         │
//! │  Type in a row ──────────► update_item() ───────► items[i]             │
//! │                                                                         │
//! │  Click Clear ────────────► clear_form() ────────► fresh document       │
//! │                                                                         │
//! │  Click Print ────────────► commit_and_print() ──► counter + 1, number  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use orden_core::document::{DraftRecord, OrderDocument};
use orden_core::pricing::PriceConverter;
use orden_core::roster::Roster;
use orden_core::sequence::{
    LegacySequenceState, LoadOutcome, SequenceRegistry, SequenceState,
};
use orden_core::types::{DayKey, DocumentNumber, PreparerId, TaxMode};
use orden_core::CoreResult;
use orden_db::{Database, DbResult};

/// Everything read from storage at startup. Each field is `None` when the
/// record was missing or malformed.
#[derive(Debug, Clone, Default)]
pub struct StoredForm {
    pub sequence: Option<SequenceState>,
    pub legacy_sequence: Option<LegacySequenceState>,
    pub preparer: Option<String>,
    pub tax_mode: Option<TaxMode>,
    pub draft: Option<DraftRecord>,
}

impl StoredForm {
    /// Reads every record the form restores from.
    pub async fn load(db: &Database) -> DbResult<Self> {
        let sequences = db.sequences();
        let preferences = db.preferences();
        Ok(StoredForm {
            sequence: sequences.load_current().await?,
            legacy_sequence: sequences.load_legacy().await?,
            preparer: preferences.load_preparer().await?,
            tax_mode: preferences.load_tax_mode().await?,
            draft: db.drafts().load().await?,
        })
    }
}

// =============================================================================
// Form
// =============================================================================

/// The work-order form.
#[derive(Debug, Clone)]
pub struct Form {
    document: OrderDocument,
    mode: TaxMode,
    preparer: PreparerId,
    registry: SequenceRegistry,
    roster: Roster,
    /// Day the visible number was last rendered for.
    rendered_day: DayKey,
}

impl Form {
    /// Rebuilds the form from stored records.
    ///
    /// ## Startup Order
    /// 1. Preparer: saved one if it is still in the roster, else the first
    /// 2. Counters: current record, legacy migration or empty
    /// 3. Document: draft merged over a fresh document
    /// 4. Number: re-rendered from the active preparer's counter
    pub fn restore(roster: Roster, stored: StoredForm, today: NaiveDate) -> (Self, LoadOutcome) {
        let day = DayKey::from_date(today);
        let preparer = roster.resolve_saved(stored.preparer.as_deref());

        let (registry, outcome) =
            SequenceRegistry::load(stored.sequence, stored.legacy_sequence, day, &preparer);

        let number = registry.document_number(&preparer, day).to_string();
        let mut document = OrderDocument::fresh(number.clone(), today);
        if let Some(draft) = stored.draft {
            document = document.merge_draft(draft);
        }
        document.number = number;

        let form = Form {
            document,
            mode: stored.tax_mode.unwrap_or_default(),
            preparer,
            registry,
            roster,
            rendered_day: day,
        };
        (form, outcome)
    }

    pub fn document(&self) -> &OrderDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut OrderDocument {
        &mut self.document
    }

    pub fn mode(&self) -> TaxMode {
        self.mode
    }

    pub fn preparer(&self) -> &PreparerId {
        &self.preparer
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    /// Converter for the current mode.
    pub fn converter(&self) -> PriceConverter {
        PriceConverter::new(self.mode)
    }

    /// The number for the active preparer right now, without incrementing.
    pub fn current_number(&self, today: NaiveDate) -> DocumentNumber {
        self.registry
            .document_number(&self.preparer, DayKey::from_date(today))
    }

    fn render_number(&mut self, today: NaiveDate) {
        self.document.number = self.current_number(today).to_string();
        self.rendered_day = DayKey::from_date(today);
    }

    /// Re-renders the number if the calendar day changed since the last
    /// render. Returns whether it did.
    pub fn roll_day(&mut self, today: NaiveDate) -> bool {
        if self.rendered_day == DayKey::from_date(today) {
            return false;
        }
        info!(day = %DayKey::from_date(today), "Day changed, re-rendering number");
        self.render_number(today);
        true
    }

    /// Switches the active preparer and shows their number. Never
    /// increments.
    pub fn set_preparer(&mut self, id: &str, today: NaiveDate) -> CoreResult<()> {
        self.preparer = self.roster.require(id)?;
        self.render_number(today);
        debug!(preparer = %self.preparer, number = %self.document.number, "Preparer set");
        Ok(())
    }

    /// Switches the tax mode. Stored prices are untouched.
    pub fn set_mode(&mut self, mode: TaxMode) {
        self.mode = mode;
    }

    /// Advances the active preparer's counter and shows the new number.
    ///
    /// The caller must persist [`Self::registry`] before printing.
    pub fn commit(&mut self, today: NaiveDate) -> DocumentNumber {
        let day = DayKey::from_date(today);
        let sequence = self.registry.increment(&self.preparer, day);
        let number = DocumentNumber::new(day, sequence);
        self.document.number = number.to_string();
        self.rendered_day = day;
        info!(preparer = %self.preparer, number = %number, "Document committed");
        number
    }

    /// Replaces the document with a fresh one numbered from the current
    /// (not incremented) counter.
    pub fn clear(&mut self, today: NaiveDate) {
        let number = self.current_number(today).to_string();
        self.document = OrderDocument::fresh(number, today);
        self.rendered_day = DayKey::from_date(today);
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// Shell-managed form state.
///
/// ## Why tokio's Mutex?
/// Commands save to SQLite while holding the guard, so it must be held
/// across `.await`.
#[derive(Debug, Clone)]
pub struct FormState {
    form: Arc<Mutex<Form>>,
}

impl FormState {
    pub fn new(form: Form) -> Self {
        FormState {
            form: Arc::new(Mutex::new(form)),
        }
    }

    /// Locks the form for exclusive access.
    pub async fn lock(&self) -> MutexGuard<'_, Form> {
        self.form.lock().await
    }

    /// Executes a function with read access to the form.
    pub async fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Form) -> R,
    {
        let form = self.form.lock().await;
        f(&form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orden_core::types::DayKey;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn tomorrow() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    fn fresh_form() -> Form {
        Form::restore(Roster::default(), StoredForm::default(), today()).0
    }

    #[test]
    fn test_fresh_start() {
        let (form, outcome) = Form::restore(Roster::default(), StoredForm::default(), today());
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(form.preparer().as_str(), "Nacho");
        assert_eq!(form.mode(), TaxMode::None);
        assert_eq!(form.document().number, "V-20250131-00");
        assert_eq!(form.document().items.len(), 1);
    }

    #[test]
    fn test_restore_ignores_unknown_saved_preparer() {
        let stored = StoredForm {
            preparer: Some("Juan".to_string()),
            ..Default::default()
        };
        let (form, _) = Form::restore(Roster::default(), stored, today());
        assert_eq!(form.preparer().as_str(), "Nacho");
    }

    #[test]
    fn test_restore_legacy_goes_to_saved_preparer() {
        let stored = StoredForm {
            preparer: Some("Pepo".to_string()),
            legacy_sequence: Some(LegacySequenceState {
                date: DayKey::from_date(today()),
                seq: 7,
            }),
            ..Default::default()
        };
        let (form, outcome) = Form::restore(Roster::default(), stored, today());
        assert_eq!(outcome, LoadOutcome::MigratedLegacy);
        assert_eq!(form.document().number, "V-20250131-07");
    }

    #[test]
    fn test_restore_draft_number_is_recomputed() {
        let draft: DraftRecord =
            serde_json::from_str(r#"{"number":"V-20250130-09","client":"ACME"}"#).unwrap();
        let stored = StoredForm {
            draft: Some(draft),
            ..Default::default()
        };
        let (form, _) = Form::restore(Roster::default(), stored, today());
        assert_eq!(form.document().client, "ACME");
        assert_eq!(form.document().number, "V-20250131-00");
    }

    #[test]
    fn test_set_preparer_renders_without_incrementing() {
        let mut form = fresh_form();
        form.commit(today());
        form.commit(today());
        assert_eq!(form.document().number, "V-20250131-02");

        form.set_preparer("Pepo", today()).unwrap();
        assert_eq!(form.document().number, "V-20250131-00");

        form.set_preparer("Nacho", today()).unwrap();
        assert_eq!(form.document().number, "V-20250131-02");
        assert_eq!(
            form.registry()
                .current_sequence(form.preparer(), DayKey::from_date(today())),
            2
        );
    }

    #[test]
    fn test_set_unknown_preparer_fails() {
        let mut form = fresh_form();
        assert!(form.set_preparer("Juan", today()).is_err());
        assert_eq!(form.preparer().as_str(), "Nacho");
    }

    #[test]
    fn test_clear_uses_current_sequence() {
        let mut form = fresh_form();
        form.document_mut().client = "ACME".to_string();
        form.document_mut().add_item();
        form.commit(today());

        form.clear(today());

        let doc = form.document();
        assert_eq!(doc.items.len(), 1);
        assert!(doc.items[0].is_blank());
        assert!(doc.client.is_empty());
        assert_eq!(doc.number, "V-20250131-01");
    }

    #[test]
    fn test_roll_day_rerenders_number() {
        let mut form = fresh_form();
        form.commit(today());

        assert!(!form.roll_day(today()));
        assert!(form.roll_day(tomorrow()));
        assert_eq!(form.document().number, "V-20250201-00");

        assert_eq!(form.commit(tomorrow()).to_string(), "V-20250201-01");
    }

    #[tokio::test]
    async fn test_form_state_lock() {
        let state = FormState::new(fresh_form());
        {
            let mut form = state.lock().await;
            form.set_mode(TaxMode::Full);
        }
        assert_eq!(state.with_form(|f| f.mode()).await, TaxMode::Full);
    }
}
