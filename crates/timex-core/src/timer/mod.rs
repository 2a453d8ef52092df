mod pomodoro;
mod stopwatch;

pub use pomodoro::{Phase, PomodoroEngine, AUTO_START_DELAY_MS};
pub use stopwatch::{Lap, StopwatchEngine};
