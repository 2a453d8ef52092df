use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::StopwatchSession;
use crate::timer::{Lap, Phase};

/// Every state change in either engine produces an Event.
/// The hosting layer renders them; snapshots drive the display projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PomodoroStarted {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    PomodoroPaused {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// Current phase rewound to its full duration.
    PomodoroReset {
        phase: Phase,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// Everything back to the initial work state.
    PomodoroResetAll {
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        from: Phase,
        to: Phase,
        completed_cycles: u32,
        time_left_secs: u32,
        /// Whether a break auto-start was scheduled by this completion.
        auto_start_pending: bool,
        at: DateTime<Utc>,
    },
    PomodoroSnapshot {
        phase: Phase,
        phase_label: String,
        time_left_secs: u32,
        display: String,
        is_running: bool,
        completed_cycles: u32,
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchStopped {
        elapsed_ms: u64,
        /// Present when the run had non-zero duration and gets recorded.
        session: Option<StopwatchSession>,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
    LapAdded {
        lap: Lap,
        at: DateTime<Utc>,
    },
    StopwatchSnapshot {
        elapsed_ms: u64,
        display: String,
        is_running: bool,
        laps: Vec<Lap>,
        at: DateTime<Utc>,
    },
}
