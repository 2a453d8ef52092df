//! Property tests for the timing invariants.
//!
//! Driven entirely on a fake clock, so arbitrary run/pause interval
//! sequences are exact rather than wall-clock approximate.

use proptest::prelude::*;

use timex_core::clock::FakeClock;
use timex_core::export::NoopExporter;
use timex_core::ports::NoopSound;
use timex_core::storage::{PomodoroConfig, StopwatchConfig};
use timex_core::timer::{Phase, PomodoroEngine, StopwatchEngine};

fn quiet() -> StopwatchConfig {
    StopwatchConfig {
        sound_enabled: false,
        ..Default::default()
    }
}

proptest! {
    // Elapsed time equals the sum of running intervals, no matter how the
    // run is chopped up by pauses of any length.
    #[test]
    fn elapsed_is_sum_of_running_intervals(
        intervals in prop::collection::vec((0u64..60_000, 0u64..600_000), 1..25)
    ) {
        let config = quiet();
        let mut engine = StopwatchEngine::new();
        let clock = FakeClock::at(1_000_000);
        let mut expected = 0u64;

        for (run_ms, pause_ms) in intervals {
            engine.start(&config, &NoopSound, &clock);
            clock.advance(run_ms);
            engine.tick(&clock);
            engine.stop(&config, &NoopSound, &clock);
            expected += run_ms;
            prop_assert_eq!(engine.elapsed_ms(), expected);
            clock.advance(pause_ms);
        }
        prop_assert_eq!(engine.elapsed_ms(), expected);
    }

    // The deltas of all laps always sum to the cumulative time of the last.
    #[test]
    fn lap_deltas_sum_to_last_cumulative(
        gaps in prop::collection::vec(1u64..30_000, 1..20)
    ) {
        let config = quiet();
        let mut engine = StopwatchEngine::new();
        let clock = FakeClock::default();

        engine.start(&config, &NoopSound, &clock);
        for gap in gaps {
            clock.advance(gap);
            engine.add_lap(&config, &NoopExporter, &clock);
        }

        let laps = engine.laps();
        let delta_sum: u64 = laps.iter().map(|l| l.delta_ms).sum();
        let last_cumulative = laps.last().map(|l| l.cumulative_ms).unwrap_or(0);
        prop_assert_eq!(delta_sum, last_cumulative);
        // Indices are 1-based insertion order.
        for (i, lap) in laps.iter().enumerate() {
            prop_assert_eq!(lap.index as usize, i + 1);
        }
    }

    // Work completions 1-3 yield short breaks, every 4th a long break,
    // for any phase durations.
    #[test]
    fn every_fourth_work_completion_is_a_long_break(
        work in 1u32..90,
        short in 1u32..30,
        long in 1u32..60,
        completions in 1usize..9
    ) {
        let config = PomodoroConfig {
            work_time: work,
            short_break: short,
            long_break: long,
            ..Default::default()
        };
        let mut engine = PomodoroEngine::new(&config);
        let clock = FakeClock::default();

        for n in 1..=completions {
            engine.start(&clock);
            while engine.is_running() {
                engine.tick(&config, &NoopSound, &clock);
            }
            let expected = if n % 4 == 0 { Phase::LongBreak } else { Phase::ShortBreak };
            prop_assert_eq!(engine.phase(), expected);
            prop_assert_eq!(engine.completed_cycles() as usize, n);

            engine.start(&clock);
            while engine.is_running() {
                engine.tick(&config, &NoopSound, &clock);
            }
            prop_assert_eq!(engine.phase(), Phase::Work);
        }
    }

    // reset_all lands on the initial work state from anywhere.
    #[test]
    fn reset_all_from_any_point(
        work in 1u32..10,
        ticks in 0usize..2_000
    ) {
        let config = PomodoroConfig {
            work_time: work,
            short_break: 1,
            long_break: 1,
            ..Default::default()
        };
        let mut engine = PomodoroEngine::new(&config);
        let clock = FakeClock::default();

        engine.start(&clock);
        for _ in 0..ticks {
            if !engine.is_running() {
                engine.start(&clock);
            }
            engine.tick(&config, &NoopSound, &clock);
        }

        engine.reset_all(&config, &clock);
        prop_assert_eq!(engine.phase(), Phase::Work);
        prop_assert_eq!(engine.time_left_secs(), config.work_secs());
        prop_assert_eq!(engine.completed_cycles(), 0);
        prop_assert!(!engine.is_running());
    }
}
