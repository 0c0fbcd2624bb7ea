//! # Platform Capabilities
//!
//! What the shell needs from its host and cannot do itself: the local
//! calendar day, a print call and a yes/no prompt.
//!
//! ```text
//! ┌──────────────────────┐      ┌─────────────────────────────────────────┐
//! │  commands            │      │  host (GUI, tests)                      │
//! │                      │      │                                         │
//! │  clock.today()   ────┼─────►│  SystemClock      / FixedClock          │
//! │  printer.print() ────┼─────►│  window print     / LogPrinter          │
//! │  confirm.confirm()───┼─────►│  modal dialog     / AutoConfirm         │
//! └──────────────────────┘      └─────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;
use tracing::info;

use crate::commands::print::PrintJob;

/// Failures reported by the host.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Print failed: {0}")]
    Print(String),
}

// =============================================================================
// Traits
// =============================================================================

/// Source of the local calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Hands the printable copies to the host's print facility.
pub trait PrintFacility: Send + Sync {
    fn print(&self, job: &PrintJob) -> Result<(), PlatformError>;
}

/// Asks the user a yes/no question. Blocking.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

// =============================================================================
// Implementations
// =============================================================================

/// The machine's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable date, for tests and demos.
#[derive(Debug)]
pub struct FixedClock {
    days_from_ce: AtomicI32,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        FixedClock {
            days_from_ce: AtomicI32::new(date.num_days_from_ce()),
        }
    }

    /// Moves the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        self.days_from_ce
            .store(date.num_days_from_ce(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.days_from_ce.load(Ordering::SeqCst))
            .unwrap_or_default()
    }
}

/// Logs the job instead of printing. Used when no host printer is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPrinter;

impl PrintFacility for LogPrinter {
    fn print(&self, job: &PrintJob) -> Result<(), PlatformError> {
        info!(
            copies = job.views.len(),
            number = job.views.first().map(|v| v.number.as_str()).unwrap_or(""),
            "Print requested"
        );
        Ok(())
    }
}

/// Answers every prompt with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

// =============================================================================
// Platform State
// =============================================================================

/// The host capabilities, shared by every command.
#[derive(Clone)]
pub struct PlatformState {
    clock: Arc<dyn Clock>,
    printer: Arc<dyn PrintFacility>,
    confirm: Arc<dyn ConfirmPrompt>,
}

impl PlatformState {
    pub fn new(
        clock: Arc<dyn Clock>,
        printer: Arc<dyn PrintFacility>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> Self {
        PlatformState {
            clock,
            printer,
            confirm,
        }
    }

    /// System clock, log printer, and a prompt that always says yes.
    pub fn headless() -> Self {
        PlatformState::new(
            Arc::new(SystemClock),
            Arc::new(LogPrinter),
            Arc::new(AutoConfirm(true)),
        )
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn printer(&self) -> &dyn PrintFacility {
        self.printer.as_ref()
    }

    pub fn confirm(&self, message: &str) -> bool {
        self.confirm.confirm(message)
    }
}

impl fmt::Debug for PlatformState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformState").finish_non_exhaustive()
    }
}
