//! Pure presentation formatting.
//!
//! Engine state is raw integers; everything display-shaped is derived here.
//! Session and export strings keep the es-ES formatting of the original
//! widget (`"1 de enero de 2026"`, `HH:MM:SS`).

use chrono::{DateTime, Locale, TimeZone};

/// Format stopwatch elapsed time.
///
/// The hours segment appears only from one hour on; the hundredths segment
/// only when `show_hundredths` is set.
pub fn stopwatch(elapsed_ms: u64, show_hundredths: bool) -> String {
    let total_secs = elapsed_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let hundredths = (elapsed_ms % 1000) / 10;

    match (hours > 0, show_hundredths) {
        (true, true) => format!("{hours:02}:{minutes:02}:{seconds:02}:{hundredths:02}"),
        (true, false) => format!("{hours:02}:{minutes:02}:{seconds:02}"),
        (false, true) => format!("{minutes:02}:{seconds:02}:{hundredths:02}"),
        (false, false) => format!("{minutes:02}:{seconds:02}"),
    }
}

/// Format a Pomodoro countdown as `MM:SS`.
pub fn pomodoro(time_left_secs: u32) -> String {
    let minutes = time_left_secs / 60;
    let seconds = time_left_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Compact human duration for history entries: `1h 2m 3s`, `2m 3s` or `3s`.
pub fn duration_human(elapsed_ms: u64) -> String {
    let total_secs = elapsed_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Time of day as `HH:MM:SS`.
pub fn time_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Long-form Spanish date, e.g. `5 de enero de 2026`.
pub fn long_date_es<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format_localized("%-d de %B de %Y", Locale::es_ES)
        .to_string()
}

/// The clock-view line: configured greeting plus the current time.
pub fn clock_line<Tz: TimeZone>(message: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{message} {}", time_of_day(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn stopwatch_under_an_hour() {
        assert_eq!(stopwatch(0, true), "00:00:00");
        assert_eq!(stopwatch(0, false), "00:00");
        assert_eq!(stopwatch(5_230, true), "00:05:23");
        assert_eq!(stopwatch(65_010, false), "01:05");
    }

    #[test]
    fn stopwatch_shows_hours_from_one_hour() {
        assert_eq!(stopwatch(3_599_990, false), "59:59");
        assert_eq!(stopwatch(3_600_000, false), "01:00:00");
        assert_eq!(stopwatch(3_661_450, true), "01:01:01:45");
    }

    #[test]
    fn pomodoro_is_minutes_and_seconds() {
        assert_eq!(pomodoro(0), "00:00");
        assert_eq!(pomodoro(59), "00:59");
        assert_eq!(pomodoro(25 * 60), "25:00");
        assert_eq!(pomodoro(90 * 60 + 5), "90:05");
    }

    #[test]
    fn duration_human_tiers() {
        assert_eq!(duration_human(0), "0s");
        assert_eq!(duration_human(42_000), "42s");
        assert_eq!(duration_human(125_000), "2m 5s");
        assert_eq!(duration_human(3_725_000), "1h 2m 5s");
    }

    #[test]
    fn spanish_long_date() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 14, 30, 9).unwrap();
        assert_eq!(long_date_es(&at), "5 de enero de 2026");
        assert_eq!(time_of_day(&at), "14:30:09");
    }

    #[test]
    fn clock_line_appends_time() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 9, 8, 7).unwrap();
        assert_eq!(clock_line("Hola son las", &at), "Hola son las 09:08:07");
    }
}
