//! # Órdenes Desktop Library
//!
//! Shell for the internal work-order form. The presentation layer calls
//! the command functions; this crate owns the form state, saves every
//! change and talks to the host through [`platform`].
//!
//! ## Module Organization
//! ```text
//! orden_desktop_lib/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── platform.rs     ◄─── Clock, print facility, confirm prompt
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── form.rs     ◄─── The form being edited
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── editor.rs   ◄─── Header and item edits, clear
//! │   ├── numbering.rs◄─── Preparer and commit/print
//! │   ├── pricing.rs  ◄─── Tax mode
//! │   ├── print.rs    ◄─── Print copies
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! Multiple focused state types instead of one `AppState`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │   DbState    │ │  FormState   │ │ ConfigState  │ │PlatformState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ • kv store   │ │ • document   │ │ • company    │ │ • clock      │   │
//! │  │ • repos      │ │ • tax mode   │ │ • preparers  │ │ • printer    │   │
//! │  │              │ │ • preparer   │ │ • delay      │ │ • confirm    │   │
//! │  │              │ │ • counters   │ │              │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Each command only requests the state it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod platform;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use orden_core::sequence::LoadOutcome;
use orden_db::migrations::migration_status;
use orden_db::{Database, DbConfig};

use error::StartupError;
use platform::PlatformState;
use state::{ConfigState, DbState, Form, FormState, StoredForm};

/// The running shell: every piece of state a command can ask for.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DbState,
    pub form: FormState,
    pub config: ConfigState,
    pub platform: PlatformState,
}

/// Opens the database and restores the form.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Determine Database Path                                             │
/// │     • ORDEN_DB_PATH, else the platform data directory                   │
/// │                                                                         │
/// │  2. Connect to Database                                                 │
/// │     • SQLite with WAL mode                                              │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Restore Form (bootstrap_with_db)                                    │
/// │     • Preparer, tax mode, counters, draft                               │
/// │     • Number re-rendered for today                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn bootstrap(config: ConfigState, platform: PlatformState) -> Result<App, StartupError> {
    let db_path = get_database_path(&config)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    info!("Database connected and migrations applied");

    bootstrap_with_db(config, db, platform).await
}

/// Restores the form from an already open database.
pub async fn bootstrap_with_db(
    config: ConfigState,
    db: Database,
    platform: PlatformState,
) -> Result<App, StartupError> {
    let roster = config.roster()?;

    let (total, applied) = migration_status(db.pool()).await?;
    info!(
        healthy = db.health_check().await,
        migrations = total,
        applied,
        "Store ready"
    );

    let stored = StoredForm::load(&db).await?;

    let (form, outcome) = Form::restore(roster, stored, platform.today());
    match outcome {
        LoadOutcome::Restored => info!("Counters restored"),
        LoadOutcome::DiscardedStale => info!("Counters from a previous day discarded"),
        LoadOutcome::MigratedLegacy => {
            info!(preparer = %form.preparer(), "Legacy counter migrated");
            db.sequences().save(form.registry().state()).await?;
        }
        LoadOutcome::Fresh => info!("No counters found, starting empty"),
    }
    info!(
        preparer = %form.preparer(),
        mode = %form.mode(),
        number = %form.document().number,
        "Form restored"
    );

    Ok(App {
        db: DbState::new(db),
        form: FormState::new(form),
        config,
        platform,
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orden=trace` - Show trace for orden crates only
/// - Default: INFO level
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orden=debug,sqlx=warn"));

    // Err only means a subscriber is already installed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.himetal.ordenes/ordenes.db`
/// - **Windows**: `%APPDATA%\himetal\ordenes\data\ordenes.db`
/// - **Linux**: `~/.local/share/ordenes/ordenes.db`
///
/// ## Development Override
/// Set `ORDEN_DB_PATH` to use a custom path.
pub fn get_database_path(config: &ConfigState) -> Result<PathBuf, StartupError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "himetal", "ordenes").ok_or(StartupError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("ordenes.db"))
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use orden_db::{Database, DbConfig};

    use crate::commands::print::PrintJob;
    use crate::platform::{ConfirmPrompt, FixedClock, PlatformError, PlatformState, PrintFacility};
    use crate::state::{ConfigState, DbState, FormState};

    type Hook = Box<dyn Fn() + Send + Sync>;

    /// Keeps every job it is handed.
    #[derive(Default)]
    pub struct RecordingPrinter {
        jobs: Mutex<Vec<PrintJob>>,
        hook: Mutex<Option<Hook>>,
    }

    impl RecordingPrinter {
        /// Number on the first copy of each printed job.
        pub fn numbers(&self) -> Vec<String> {
            self.jobs
                .lock()
                .unwrap()
                .iter()
                .filter_map(|job| job.views.first().map(|v| v.number.clone()))
                .collect()
        }

        /// Runs `f` at the start of every print call.
        pub fn on_print(&self, f: impl Fn() + Send + Sync + 'static) {
            *self.hook.lock().unwrap() = Some(Box::new(f));
        }
    }

    impl PrintFacility for RecordingPrinter {
        fn print(&self, job: &PrintJob) -> Result<(), PlatformError> {
            if let Some(hook) = self.hook.lock().unwrap().as_ref() {
                hook();
            }
            self.jobs.lock().unwrap().push(job.clone());
            Ok(())
        }
    }

    /// Answers prompts with a settable value and remembers the questions.
    pub struct ScriptedConfirm {
        answer: Mutex<bool>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedConfirm {
        pub fn answer(&self, yes: bool) {
            *self.answer.lock().unwrap() = yes;
        }

        pub fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    impl Default for ScriptedConfirm {
        fn default() -> Self {
            ScriptedConfirm {
                answer: Mutex::new(true),
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    impl ConfirmPrompt for ScriptedConfirm {
        fn confirm(&self, message: &str) -> bool {
            self.asked.lock().unwrap().push(message.to_string());
            *self.answer.lock().unwrap()
        }
    }

    pub struct Harness {
        pub db: DbState,
        pub form: FormState,
        pub config: ConfigState,
        pub platform: PlatformState,
        pub clock: Arc<FixedClock>,
        pub printer: Arc<RecordingPrinter>,
        pub confirm: Arc<ScriptedConfirm>,
    }

    /// Fresh in-memory store, default roster, 2025-01-31, no print delay.
    pub async fn harness() -> Harness {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        harness_with_db(db).await
    }

    pub async fn harness_with_db(db: Database) -> Harness {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        let printer = Arc::new(RecordingPrinter::default());
        let confirm = Arc::new(ScriptedConfirm::default());
        let platform = PlatformState::new(clock.clone(), printer.clone(), confirm.clone());
        let config = ConfigState {
            print_delay_ms: 0,
            ..ConfigState::default()
        };

        let app = crate::bootstrap_with_db(config, db, platform).await.unwrap();
        Harness {
            db: app.db,
            form: app.form,
            config: app.config,
            platform: app.platform,
            clock,
            printer,
            confirm,
        }
    }
}
