mod config;
mod history;
mod store;

pub use config::{
    AppConfig, ConfigStore, PomodoroConfig, PomodoroConfigPatch, RelojConfig, RelojConfigPatch,
    StopwatchConfig, StopwatchConfigPatch,
};
pub use history::{History, StopwatchSession};
pub use store::JsonStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Storage key for the combined configuration record.
pub const CONFIG_KEY: &str = "timex-config";
/// Storage key for the stopwatch session history record.
pub const HISTORY_KEY: &str = "timex-stopwatch-history";

/// Returns `~/.config/timex[-dev]/` based on TIMEX_ENV.
///
/// Set TIMEX_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMEX_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timex-dev")
    } else {
        base_dir.join("timex")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
