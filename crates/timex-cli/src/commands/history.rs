//! Session history subcommands.

use clap::Subcommand;

use timex_core::{Exporter, History, JsonFileExporter, JsonStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print all sessions as JSON, most recent first
    List,
    /// Delete one session by id
    Delete { id: String },
    /// Delete every session
    Clear,
    /// Write sessions to JSON files under the export directory
    Export {
        /// Export a single session instead of the full history
        #[arg(long)]
        id: Option<String>,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let mut history = History::load(store);

    match action {
        HistoryAction::List => {
            println!("{}", serde_json::to_string_pretty(history.list())?);
        }
        HistoryAction::Delete { id } => {
            if !history.delete(&id)? {
                return Err(format!("no session with id {id}").into());
            }
            eprintln!("deleted {id}");
        }
        HistoryAction::Clear => {
            let count = history.len();
            history.clear()?;
            eprintln!("cleared {count} session(s)");
        }
        HistoryAction::Export { id } => {
            let exporter = JsonFileExporter::open_default()?;
            match id {
                Some(id) => {
                    let session = history
                        .export_one(&id)
                        .ok_or_else(|| format!("no session with id {id}"))?;
                    exporter.export_session(session)?;
                }
                None => exporter.export_history(&history.export_all())?,
            }
            eprintln!("exported to {}", exporter.dir().display());
        }
    }
    Ok(())
}
