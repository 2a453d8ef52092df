//! Configuration subcommands.

use clap::Subcommand;

use timex_core::{ConfigStore, JsonStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full configuration as JSON
    Show,
    /// Get one value by dot-path key, e.g. pomodoroConfig.workTime
    Get { key: String },
    /// Set one value by dot-path key
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let mut config_store = ConfigStore::load(store);

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config_store.config())?);
        }
        ConfigAction::Get { key } => match config_store.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown config key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            config_store.set(&key, &value)?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}
