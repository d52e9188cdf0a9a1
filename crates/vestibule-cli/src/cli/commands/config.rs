//! The `config` subcommand.

use anyhow::Result;
use vestibule_core::config::paths;

/// Prints the path to the config file.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}
