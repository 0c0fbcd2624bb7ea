//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ORDEN_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use orden_core::roster::Roster;
use orden_core::{CoreResult, DEFAULT_PREPARERS, PRINT_SETTLE_DELAY_MS};

/// Company name printed on both copies when none is configured.
pub const DEFAULT_COMPANY_NAME: &str = "HIMETAL S.A.";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Company name shown in the header and on print copies.
    pub company_name: String,

    /// Preparer ids in toggle order. The first one is the default.
    pub preparers: Vec<String>,

    /// Pause between commit and print, in milliseconds.
    pub print_delay_ms: u64,

    /// Database file override. `None` means the platform data directory.
    #[serde(skip)]
    pub db_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Company: "HIMETAL S.A."
    /// - Preparers: Nacho, Pepo
    /// - Print delay: 40 ms
    fn default() -> Self {
        ConfigState {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            preparers: DEFAULT_PREPARERS.iter().map(|p| p.to_string()).collect(),
            print_delay_ms: PRINT_SETTLE_DELAY_MS,
            db_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ORDEN_COMPANY_NAME`: Override company name
    /// - `ORDEN_PREPARERS`: Comma-separated roster, e.g. `Nacho,Pepo`
    /// - `ORDEN_PRINT_DELAY_MS`: Settle delay before printing
    /// - `ORDEN_DB_PATH`: Database file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("ORDEN_COMPANY_NAME") {
            if !name.trim().is_empty() {
                config.company_name = name.trim().to_string();
            }
        }

        if let Some(list) = lookup("ORDEN_PREPARERS") {
            config.preparers = list
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }

        if let Some(raw) = lookup("ORDEN_PRINT_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.print_delay_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring invalid ORDEN_PRINT_DELAY_MS"),
            }
        }

        if let Some(path) = lookup("ORDEN_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// The configured roster, validated.
    pub fn roster(&self) -> CoreResult<Roster> {
        Roster::new(self.preparers.iter().cloned())
    }

    /// The settle delay as a duration.
    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }
}
