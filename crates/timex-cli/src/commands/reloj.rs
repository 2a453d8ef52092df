//! Clock view subcommand.

use clap::Subcommand;

use timex_core::{format, ConfigStore, JsonStore};

#[derive(Subcommand)]
pub enum RelojAction {
    /// Print the configured greeting with the current time
    Show,
}

pub fn run(action: RelojAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open()?;
    let config_store = ConfigStore::load(store);

    match action {
        RelojAction::Show => {
            let now = chrono::Local::now();
            println!(
                "{}",
                format::clock_line(&config_store.reloj().custom_message, &now)
            );
        }
    }
    Ok(())
}
