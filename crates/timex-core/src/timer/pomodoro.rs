//! Pomodoro phase state machine.
//!
//! The engine owns no threads and no callbacks - the host calls `tick()`
//! once per elapsed second while it wants the countdown to progress. Phase
//! durations are read from the configuration at every transition, so a
//! config change takes effect on the next phase or an explicit reset.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work (4th) -> LongBreak -> Work
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::events::Event;
use crate::format;
use crate::ports::SoundPlayer;
use crate::storage::PomodoroConfig;

/// Delay before an auto-started break begins running.
pub const AUTO_START_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human label shown by the hosting UI.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Tiempo de Trabajo",
            Phase::ShortBreak => "Descanso Corto",
            Phase::LongBreak => "Descanso Largo",
        }
    }

    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Configured duration of this phase in seconds.
    pub fn duration_secs(self, config: &PomodoroConfig) -> u32 {
        match self {
            Phase::Work => config.work_secs(),
            Phase::ShortBreak => config.short_break_secs(),
            Phase::LongBreak => config.long_break_secs(),
        }
    }
}

/// Work/break countdown state machine.
///
/// Serializable so a per-invocation host (the CLI) can persist it between
/// commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    phase: Phase,
    time_left_secs: u32,
    is_running: bool,
    completed_cycles: u32,
    /// Deadline (epoch ms) of a pending break auto-start. Cancelled by any
    /// manual intervention before it fires.
    #[serde(default)]
    auto_start_at_ms: Option<u64>,
}

impl PomodoroEngine {
    /// Fresh engine in the work phase with the configured work duration.
    pub fn new(config: &PomodoroConfig) -> Self {
        Self {
            phase: Phase::Work,
            time_left_secs: config.work_secs(),
            is_running: false,
            completed_cycles: 0,
            auto_start_at_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn auto_start_pending(&self) -> bool {
        self.auto_start_at_ms.is_some()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, clock: &dyn Clock) -> Event {
        Event::PomodoroSnapshot {
            phase: self.phase,
            phase_label: self.phase.label().to_string(),
            time_left_secs: self.time_left_secs,
            display: format::pomodoro(self.time_left_secs),
            is_running: self.is_running,
            completed_cycles: self.completed_cycles,
            at: clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. No-op while already running.
    pub fn start(&mut self, clock: &dyn Clock) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.auto_start_at_ms = None;
        self.is_running = true;
        Some(Event::PomodoroStarted {
            phase: self.phase,
            time_left_secs: self.time_left_secs,
            at: clock.now(),
        })
    }

    /// Halt the countdown, keeping the remaining time.
    pub fn pause(&mut self, clock: &dyn Clock) -> Option<Event> {
        self.auto_start_at_ms = None;
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::PomodoroPaused {
            phase: self.phase,
            time_left_secs: self.time_left_secs,
            at: clock.now(),
        })
    }

    /// Rewind the current phase to its full configured duration. Phase and
    /// completed cycle count are untouched.
    pub fn reset(&mut self, config: &PomodoroConfig, clock: &dyn Clock) -> Event {
        self.auto_start_at_ms = None;
        self.is_running = false;
        self.time_left_secs = self.phase.duration_secs(config);
        Event::PomodoroReset {
            phase: self.phase,
            time_left_secs: self.time_left_secs,
            at: clock.now(),
        }
    }

    /// Back to the initial work state with zero completed cycles.
    pub fn reset_all(&mut self, config: &PomodoroConfig, clock: &dyn Clock) -> Event {
        self.auto_start_at_ms = None;
        self.is_running = false;
        self.phase = Phase::Work;
        self.time_left_secs = config.work_secs();
        self.completed_cycles = 0;
        Event::PomodoroResetAll {
            time_left_secs: self.time_left_secs,
            at: clock.now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Call once per elapsed second while hosting a running engine. Returns
    /// `Some(Event::PhaseCompleted)` when the phase finishes, or
    /// `Some(Event::PomodoroStarted)` when a pending break auto-start
    /// fires.
    pub fn tick(
        &mut self,
        config: &PomodoroConfig,
        sound: &dyn SoundPlayer,
        clock: &dyn Clock,
    ) -> Option<Event> {
        if !self.is_running {
            if let Some(deadline) = self.auto_start_at_ms {
                if clock.now_ms() >= deadline {
                    self.auto_start_at_ms = None;
                    self.is_running = true;
                    return Some(Event::PomodoroStarted {
                        phase: self.phase,
                        time_left_secs: self.time_left_secs,
                        at: clock.now(),
                    });
                }
            }
            return None;
        }
        // A zero here means the phase already completed and state is stale;
        // complete without decrementing rather than underflow.
        if self.time_left_secs > 0 {
            self.time_left_secs -= 1;
        }
        if self.time_left_secs == 0 {
            return Some(self.complete_phase(config, sound, clock));
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(
        &mut self,
        config: &PomodoroConfig,
        sound: &dyn SoundPlayer,
        clock: &dyn Clock,
    ) -> Event {
        if config.pomodoro_sound {
            let _ = sound.play_notification();
        }
        self.is_running = false;

        let from = self.phase;
        let to = match from {
            Phase::Work => {
                self.completed_cycles += 1;
                if self.completed_cycles % 4 == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = to;
        self.time_left_secs = to.duration_secs(config);

        let auto_start = config.auto_start_breaks && to.is_break();
        self.auto_start_at_ms = auto_start.then(|| clock.now_ms() + AUTO_START_DELAY_MS);

        Event::PhaseCompleted {
            from,
            to,
            completed_cycles: self.completed_cycles,
            time_left_secs: self.time_left_secs,
            auto_start_pending: auto_start,
            at: clock.now(),
        }
    }
}
