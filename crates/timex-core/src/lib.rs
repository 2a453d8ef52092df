//! # Timex Core Library
//!
//! Core business logic for Timex, a three-view time tracker (clock,
//! Pomodoro timer, stopwatch with laps and session history). The hosting
//! layer - the CLI binary here, a GUI elsewhere - is a thin shell over this
//! library.
//!
//! ## Architecture
//!
//! - **Engines**: tick-driven state machines. They own no threads and no
//!   timers; the host calls `tick()` at its own cadence and a [`Clock`]
//!   supplies the time, so all timing logic is deterministic under test.
//! - **Storage**: JSON key-value records under `~/.config/timex/`, one file
//!   per key. Reads are fail-soft (malformed data degrades to defaults).
//! - **Ports**: sound and export are injected fire-and-forget traits whose
//!   failures never touch engine state.
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: work/short-break/long-break phase cycle
//! - [`StopwatchEngine`]: anchor-based elapsed accumulator with laps
//! - [`ConfigStore`]: persisted per-mode settings, shallow-merge updates
//! - [`History`]: most-recent-first log of completed stopwatch sessions

pub mod clock;
pub mod error;
pub mod events;
pub mod export;
pub mod format;
pub mod ports;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use export::{Exporter, JsonFileExporter, LapExport, NoopExporter};
pub use ports::{NoopSound, SoundPlayer};
pub use storage::{
    AppConfig, ConfigStore, History, JsonStore, PomodoroConfig, PomodoroConfigPatch, RelojConfig,
    RelojConfigPatch, StopwatchConfig, StopwatchConfigPatch, StopwatchSession,
};
pub use timer::{Lap, Phase, PomodoroEngine, StopwatchEngine};
