//! Stopwatch engine.
//!
//! Elapsed time is derived from an anchor timestamp, not accumulated per
//! tick: on every start the anchor is recomputed as `now - elapsed_ms`, so
//! resuming after a pause continues exactly where it left off regardless of
//! how long the pause lasted. `tick()` merely refreshes `elapsed_ms` from
//! the anchor at whatever cadence the host chooses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::events::Event;
use crate::export::{Exporter, LapExport};
use crate::format;
use crate::ports::SoundPlayer;
use crate::storage::{StopwatchConfig, StopwatchSession};

/// One recorded checkpoint: cumulative elapsed time plus the delta since
/// the previous lap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based insertion order.
    pub index: u32,
    pub cumulative_ms: u64,
    /// Time since the previous lap, or the full cumulative time for the
    /// first.
    pub delta_ms: u64,
    pub name: String,
}

/// Start/stop/lap accumulator with pause-resume correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwatchEngine {
    elapsed_ms: u64,
    is_running: bool,
    laps: Vec<Lap>,
    session_start: Option<DateTime<Utc>>,
    /// Epoch ms of the computed start-of-epoch instant; only meaningful
    /// while running.
    #[serde(default)]
    anchor_ms: Option<u64>,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwatchEngine {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0,
            is_running: false,
            laps: Vec::new(),
            session_start: None,
            anchor_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn session_start(&self) -> Option<DateTime<Utc>> {
        self.session_start
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, config: &StopwatchConfig, clock: &dyn Clock) -> Event {
        Event::StopwatchSnapshot {
            elapsed_ms: self.elapsed_ms,
            display: format::stopwatch(self.elapsed_ms, config.show_microseconds),
            is_running: self.is_running,
            laps: self.laps.clone(),
            at: clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume. No-op while already running.
    ///
    /// The session start timestamp is set only on the first start since the
    /// last reset; resuming after a pause keeps the original one.
    pub fn start(
        &mut self,
        config: &StopwatchConfig,
        sound: &dyn SoundPlayer,
        clock: &dyn Clock,
    ) -> Option<Event> {
        if self.is_running {
            return None;
        }
        if config.sound_enabled {
            let _ = sound.play_notification();
        }
        self.anchor_ms = Some(clock.now_ms().saturating_sub(self.elapsed_ms));
        if self.session_start.is_none() {
            self.session_start = Some(clock.now());
        }
        self.is_running = true;
        Some(Event::StopwatchStarted {
            elapsed_ms: self.elapsed_ms,
            at: clock.now(),
        })
    }

    /// Refresh `elapsed_ms` from the anchor. Call at display cadence while
    /// running; harmless otherwise.
    pub fn tick(&mut self, clock: &dyn Clock) {
        if !self.is_running {
            return;
        }
        if let Some(anchor) = self.anchor_ms {
            self.elapsed_ms = clock.now_ms().saturating_sub(anchor);
        }
    }

    /// Stop and freeze the elapsed time. A non-zero run with a session
    /// start yields a [`StopwatchSession`] for the history log.
    pub fn stop(
        &mut self,
        config: &StopwatchConfig,
        sound: &dyn SoundPlayer,
        clock: &dyn Clock,
    ) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.tick(clock);
        self.is_running = false;
        self.anchor_ms = None;
        if config.sound_enabled {
            let _ = sound.play_notification();
        }

        let session = match (self.elapsed_ms > 0, self.session_start) {
            (true, Some(start)) => {
                let start_local = start.with_timezone(&chrono::Local);
                let end_local = clock.now().with_timezone(&chrono::Local);
                Some(StopwatchSession {
                    id: Uuid::new_v4().to_string(),
                    start_time: format::time_of_day(&start_local),
                    end_time: format::time_of_day(&end_local),
                    duration_ms: self.elapsed_ms,
                    laps_count: self.laps.len() as u32,
                    date: format::long_date_es(&start_local),
                })
            }
            _ => None,
        };

        Some(Event::StopwatchStopped {
            elapsed_ms: self.elapsed_ms,
            session,
            at: clock.now(),
        })
    }

    /// Back to zero: stopped, no laps, no session start.
    pub fn reset(&mut self, clock: &dyn Clock) -> Event {
        self.is_running = false;
        self.elapsed_ms = 0;
        self.laps.clear();
        self.session_start = None;
        self.anchor_ms = None;
        Event::StopwatchReset { at: clock.now() }
    }

    /// Record a checkpoint at the current elapsed time. No-op at zero.
    ///
    /// With `auto_save` enabled the new lap is handed to the exporter port;
    /// export failure is ignored.
    pub fn add_lap(
        &mut self,
        config: &StopwatchConfig,
        exporter: &dyn Exporter,
        clock: &dyn Clock,
    ) -> Option<Event> {
        self.tick(clock);
        if self.elapsed_ms == 0 {
            return None;
        }
        let delta_ms = match self.laps.last() {
            Some(prev) => self.elapsed_ms.saturating_sub(prev.cumulative_ms),
            None => self.elapsed_ms,
        };
        let lap = Lap {
            index: self.laps.len() as u32 + 1,
            cumulative_ms: self.elapsed_ms,
            delta_ms,
            name: format!("Vuelta {}", self.laps.len() + 1),
        };
        self.laps.push(lap.clone());

        if config.auto_save {
            let at = clock.now().with_timezone(&chrono::Local);
            let _ = exporter.export_lap(&LapExport::new(&lap, config.show_microseconds, &at));
        }

        Some(Event::LapAdded {
            lap,
            at: clock.now(),
        })
    }
}
