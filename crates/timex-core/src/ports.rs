//! Fire-and-forget side-effect ports.
//!
//! The engines call these but never depend on their outcome: every call
//! site discards the result, so a failing sound device or export sink can
//! never affect timer state.

/// Notification sound sink.
pub trait SoundPlayer {
    /// Play the notification chime.
    ///
    /// # Errors
    /// Returns an error if playback fails; callers ignore it.
    fn play_notification(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Silent default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSound;

impl SoundPlayer for NoopSound {
    fn play_notification(&self) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::Cell;

    /// Counts plays; optionally fails every call to prove failures are
    /// swallowed.
    #[derive(Debug, Default)]
    pub struct RecordingSound {
        pub plays: Cell<u32>,
        pub fail: bool,
    }

    impl SoundPlayer for RecordingSound {
        fn play_notification(&self) -> Result<(), Box<dyn std::error::Error>> {
            self.plays.set(self.plays.get() + 1);
            if self.fail {
                return Err("no audio device".into());
            }
            Ok(())
        }
    }
}
