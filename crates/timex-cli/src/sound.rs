//! Terminal notification sound.

use std::io::Write;

use timex_core::SoundPlayer;

/// Rings the terminal bell. The closest a CLI host gets to the widget's
/// notification chime; failures are ignored by the engines as usual.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play_notification(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}
