pub mod config;
pub mod history;
pub mod pomodoro;
pub mod reloj;
pub mod stopwatch;
