//! Persisted application configuration.
//!
//! All three mode configs live in a single JSON record under the
//! `timex-config` key, camelCase on the wire:
//! `{ "stopwatchConfig": .., "pomodoroConfig": .., "relojConfig": .. }`.
//!
//! Loading is fail-soft twice over: a missing or unparseable record yields
//! the full defaults, and a parseable record with missing fields fills each
//! absent field from its own default.

use serde::{Deserialize, Serialize};

use super::{JsonStore, CONFIG_KEY};
use crate::error::{ConfigError, StorageError};

/// Stopwatch display and side-effect flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchConfig {
    #[serde(default = "default_true")]
    pub show_microseconds: bool,
    #[serde(default)]
    pub auto_save: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

/// Pomodoro phase durations (minutes) and behavior flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroConfig {
    #[serde(default = "default_work_time")]
    pub work_time: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    #[serde(default = "default_true")]
    pub pomodoro_sound: bool,
    #[serde(default)]
    pub auto_start_breaks: bool,
}

impl PomodoroConfig {
    /// Work phase length in seconds, clamped to at least one minute so a
    /// zero duration can never produce a non-terminating countdown.
    pub fn work_secs(&self) -> u32 {
        self.work_time.max(1).saturating_mul(60)
    }

    pub fn short_break_secs(&self) -> u32 {
        self.short_break.max(1).saturating_mul(60)
    }

    pub fn long_break_secs(&self) -> u32 {
        self.long_break.max(1).saturating_mul(60)
    }
}

/// Clock-view settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelojConfig {
    #[serde(default)]
    pub enable_screenshot_export: bool,
    #[serde(default = "default_custom_message")]
    pub custom_message: String,
}

/// The combined persisted configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub stopwatch_config: StopwatchConfig,
    #[serde(default)]
    pub pomodoro_config: PomodoroConfig,
    #[serde(default)]
    pub reloj_config: RelojConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_work_time() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    15
}
fn default_custom_message() -> String {
    "Hola son las".into()
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            show_microseconds: true,
            auto_save: false,
            sound_enabled: true,
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_time: default_work_time(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            pomodoro_sound: true,
            auto_start_breaks: false,
        }
    }
}

impl Default for RelojConfig {
    fn default() -> Self {
        Self {
            enable_screenshot_export: false,
            custom_message: default_custom_message(),
        }
    }
}

/// Partial update for [`StopwatchConfig`]; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopwatchConfigPatch {
    pub show_microseconds: Option<bool>,
    pub auto_save: Option<bool>,
    pub sound_enabled: Option<bool>,
}

/// Partial update for [`PomodoroConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroConfigPatch {
    pub work_time: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
    pub pomodoro_sound: Option<bool>,
    pub auto_start_breaks: Option<bool>,
}

/// Partial update for [`RelojConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelojConfigPatch {
    pub enable_screenshot_export: Option<bool>,
    pub custom_message: Option<String>,
}

impl StopwatchConfigPatch {
    fn apply(&self, config: &mut StopwatchConfig) {
        if let Some(v) = self.show_microseconds {
            config.show_microseconds = v;
        }
        if let Some(v) = self.auto_save {
            config.auto_save = v;
        }
        if let Some(v) = self.sound_enabled {
            config.sound_enabled = v;
        }
    }
}

impl PomodoroConfigPatch {
    fn apply(&self, config: &mut PomodoroConfig) {
        if let Some(v) = self.work_time {
            config.work_time = v;
        }
        if let Some(v) = self.short_break {
            config.short_break = v;
        }
        if let Some(v) = self.long_break {
            config.long_break = v;
        }
        if let Some(v) = self.pomodoro_sound {
            config.pomodoro_sound = v;
        }
        if let Some(v) = self.auto_start_breaks {
            config.auto_start_breaks = v;
        }
    }
}

impl RelojConfigPatch {
    fn apply(&self, config: &mut RelojConfig) {
        if let Some(v) = self.enable_screenshot_export {
            config.enable_screenshot_export = v;
        }
        if let Some(ref v) = self.custom_message {
            config.custom_message = v.clone();
        }
    }
}

/// Owns the in-memory configuration snapshot and persists every mutation.
///
/// Engines read from it but never write; the hosting layer is the single
/// writer.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    store: JsonStore,
    config: AppConfig,
}

impl ConfigStore {
    /// Load from the store, substituting defaults for anything unreadable.
    pub fn load(store: JsonStore) -> Self {
        let config = store.get(CONFIG_KEY).unwrap_or_default();
        Self { store, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stopwatch(&self) -> &StopwatchConfig {
        &self.config.stopwatch_config
    }

    pub fn pomodoro(&self) -> &PomodoroConfig {
        &self.config.pomodoro_config
    }

    pub fn reloj(&self) -> &RelojConfig {
        &self.config.reloj_config
    }

    /// Merge a stopwatch patch and persist.
    ///
    /// # Errors
    /// Returns an error if the write fails; the in-memory state is updated
    /// regardless.
    pub fn update_stopwatch(&mut self, patch: &StopwatchConfigPatch) -> Result<(), StorageError> {
        patch.apply(&mut self.config.stopwatch_config);
        self.persist()
    }

    /// Merge a Pomodoro patch and persist.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn update_pomodoro(&mut self, patch: &PomodoroConfigPatch) -> Result<(), StorageError> {
        patch.apply(&mut self.config.pomodoro_config);
        self.persist()
    }

    /// Merge a clock-view patch and persist.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn update_reloj(&mut self, patch: &RelojConfigPatch) -> Result<(), StorageError> {
        patch.apply(&mut self.config.reloj_config);
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.set(CONFIG_KEY, &self.config)
    }

    /// Get a config value as string by dot-separated key, e.g.
    /// `pomodoroConfig.workTime`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(&self.config).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// for the field's type, or the write fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), crate::error::CoreError> {
        let mut json = serde_json::to_value(&self.config)?;
        set_json_value_by_path(&mut json, key, value)?;
        self.config = serde_json::from_value(json)?;
        self.persist()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as number"),
                    })?;
                    serde_json::Value::Number(n.into())
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}
