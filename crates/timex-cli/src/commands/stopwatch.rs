//! Stopwatch subcommands.
//!
//! The engine derives elapsed time from its epoch anchor, so persisting it
//! between invocations is enough: a `status` after a running `start`
//! reflects the real elapsed wall time with no replay needed.

use clap::Subcommand;

use timex_core::{
    ConfigStore, Event, Exporter, History, JsonFileExporter, JsonStore, LapExport, StopwatchEngine,
    SystemClock,
};

use crate::sound::TerminalBell;

const STATE_KEY: &str = "timex-stopwatch-state";

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start or resume
    Start,
    /// Stop and record the session to history
    Stop,
    /// Back to zero, clearing laps
    Reset,
    /// Record a lap at the current elapsed time
    Lap,
    /// Print the current state as JSON
    Status,
    /// Export every recorded lap as JSON files
    ExportLaps,
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let config_store = ConfigStore::load(store.clone());
    let config = config_store.stopwatch().clone();
    let clock = SystemClock;
    let bell = TerminalBell;
    let mut engine: StopwatchEngine = store.get(STATE_KEY).unwrap_or_default();
    engine.tick(&clock);

    let event = match action {
        StopwatchAction::Start => engine.start(&config, &bell, &clock),
        StopwatchAction::Stop => {
            let event = engine.stop(&config, &bell, &clock);
            if let Some(Event::StopwatchStopped {
                session: Some(ref session),
                ..
            }) = event
            {
                let mut history = History::load(store.clone());
                history.add(session.clone())?;
            }
            event
        }
        StopwatchAction::Reset => Some(engine.reset(&clock)),
        StopwatchAction::Lap => {
            let exporter = JsonFileExporter::open_default()?;
            engine.add_lap(&config, &exporter, &clock)
        }
        StopwatchAction::Status => Some(engine.snapshot(&config, &clock)),
        StopwatchAction::ExportLaps => {
            let exporter = JsonFileExporter::open_default()?;
            let at = chrono::Local::now();
            for lap in engine.laps() {
                exporter.export_lap(&LapExport::new(lap, config.show_microseconds, &at))?;
            }
            eprintln!(
                "exported {} lap(s) to {}",
                engine.laps().len(),
                exporter.dir().display()
            );
            None
        }
    };
    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    store.set(STATE_KEY, &engine)?;
    Ok(())
}
