//! Pomodoro subcommands.
//!
//! The CLI is a per-invocation host: the engine plus the timestamp of its
//! last tick are persisted between commands, and every command first
//! replays the seconds that passed since then so the countdown tracks wall
//! time.

use clap::Subcommand;
use serde::{Deserialize, Serialize};

use timex_core::{
    Clock, ConfigStore, Event, JsonStore, PomodoroConfig, PomodoroEngine, SoundPlayer, SystemClock,
};

use crate::sound::TerminalBell;

const STATE_KEY: &str = "timex-pomodoro-state";

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Rewind the current phase to its full duration
    Reset,
    /// Back to the work phase with zero completed cycles
    ResetAll,
    /// Print the current state as JSON
    Status,
}

#[derive(Serialize, Deserialize)]
struct PersistedPomodoro {
    engine: PomodoroEngine,
    last_tick_ms: u64,
}

fn load(store: &JsonStore, config: &PomodoroConfig, clock: &dyn Clock) -> PersistedPomodoro {
    store.get(STATE_KEY).unwrap_or_else(|| PersistedPomodoro {
        engine: PomodoroEngine::new(config),
        last_tick_ms: clock.now_ms(),
    })
}

/// Replay one tick per elapsed second since the last invocation.
fn catch_up(
    state: &mut PersistedPomodoro,
    config: &PomodoroConfig,
    sound: &dyn SoundPlayer,
    clock: &dyn Clock,
) -> Vec<Event> {
    let now = clock.now_ms();
    if !state.engine.is_running() && !state.engine.auto_start_pending() {
        state.last_tick_ms = now;
        return Vec::new();
    }
    let mut events = Vec::new();
    while now.saturating_sub(state.last_tick_ms) >= 1_000 {
        state.last_tick_ms += 1_000;
        if let Some(event) = state.engine.tick(config, sound, clock) {
            events.push(event);
        }
        if !state.engine.is_running() && !state.engine.auto_start_pending() {
            state.last_tick_ms = now;
            break;
        }
    }
    events
}

pub fn run(action: PomodoroAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let config_store = ConfigStore::load(store.clone());
    let config = config_store.pomodoro().clone();
    let clock = SystemClock;
    let bell = TerminalBell;
    let mut state = load(&store, &config, &clock);

    for event in catch_up(&mut state, &config, &bell, &clock) {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    let event = match action {
        PomodoroAction::Start => state.engine.start(&clock),
        PomodoroAction::Pause => state.engine.pause(&clock),
        PomodoroAction::Reset => Some(state.engine.reset(&config, &clock)),
        PomodoroAction::ResetAll => Some(state.engine.reset_all(&config, &clock)),
        PomodoroAction::Status => Some(state.engine.snapshot(&clock)),
    };
    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    store.set(STATE_KEY, &state)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use timex_core::{FakeClock, NoopSound};

    #[test]
    fn catch_up_replays_elapsed_seconds() {
        let config = PomodoroConfig {
            work_time: 1,
            ..Default::default()
        };
        let clock = FakeClock::at(10_000);
        let mut state = PersistedPomodoro {
            engine: PomodoroEngine::new(&config),
            last_tick_ms: clock.now_ms(),
        };
        state.engine.start(&clock);

        clock.advance(30_500);
        let events = catch_up(&mut state, &config, &NoopSound, &clock);
        assert!(events.is_empty());
        assert_eq!(state.engine.time_left_secs(), 30);
        // The half second remainder stays pending.
        assert_eq!(state.last_tick_ms, 40_000);
    }

    #[test]
    fn catch_up_completes_overdue_phase_and_stops() {
        let config = PomodoroConfig {
            work_time: 1,
            ..Default::default()
        };
        let clock = FakeClock::at(0);
        let mut state = PersistedPomodoro {
            engine: PomodoroEngine::new(&config),
            last_tick_ms: 0,
        };
        state.engine.start(&clock);

        // Away far longer than the phase; replay stops at the completion
        // instead of burning through the pause.
        clock.advance(3_600_000);
        let events = catch_up(&mut state, &config, &NoopSound, &clock);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::PhaseCompleted { .. }));
        assert!(!state.engine.is_running());
        assert_eq!(state.last_tick_ms, 3_600_000);
    }

    #[test]
    fn catch_up_while_idle_just_advances_the_cursor() {
        let config = PomodoroConfig::default();
        let clock = FakeClock::at(0);
        let mut state = PersistedPomodoro {
            engine: PomodoroEngine::new(&config),
            last_tick_ms: 0,
        };
        clock.advance(86_400_000);
        let events = catch_up(&mut state, &config, &NoopSound, &clock);
        assert!(events.is_empty());
        assert_eq!(state.engine.time_left_secs(), config.work_secs());
        assert_eq!(state.last_tick_ms, 86_400_000);
    }
}
