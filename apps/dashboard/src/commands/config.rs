//! # Config Commands
//!
//! Commands for retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (store name in the header)
/// - Currency formatting
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
