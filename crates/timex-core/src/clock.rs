//! Time source abstraction.
//!
//! The engines never read the wall clock directly. They take a [`Clock`]
//! per call, so the host decides the tick cadence and tests can advance
//! time deterministically with [`FakeClock`].

use chrono::{DateTime, Utc};

/// A monotonic-enough time source.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Current instant as a timestamp.
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.now_ms() as i64).unwrap_or_default()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct FakeClock {
    ms: std::cell::Cell<u64>,
}

impl FakeClock {
    pub fn at(ms: u64) -> Self {
        Self {
            ms: std::cell::Cell::new(ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.ms.set(self.ms.get() + ms);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.ms.get()
    }
}
