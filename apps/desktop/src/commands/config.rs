//! # Config Commands
//!
//! Read-only access to the loaded configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - Startup (company name in the header)
/// - Building the preparer toggle
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
