mod event_log;
mod settings;
mod store;

pub use event_log::{EventLog, ExportBundle};
pub use settings::{NotificationPrefs, UserConfig};
pub use store::Store;

use std::path::PathBuf;

/// Returns `~/.config/exhale[-dev]/` based on EXHALE_ENV.
///
/// Set EXHALE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EXHALE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("exhale-dev")
    } else {
        base_dir.join("exhale")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
