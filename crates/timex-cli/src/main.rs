use clap::{Parser, Subcommand};

mod commands;
mod sound;

#[derive(Parser)]
#[command(name = "timex-cli", version, about = "Timex CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pomodoro timer control
    Pomodoro {
        #[command(subcommand)]
        action: commands::pomodoro::PomodoroAction,
    },
    /// Stopwatch control
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stopwatch session history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Clock view
    Reloj {
        #[command(subcommand)]
        action: commands::reloj::RelojAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pomodoro { action } => commands::pomodoro::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Reloj { action } => commands::reloj::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
