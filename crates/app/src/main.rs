//! Study cafe directory
//!
//! Browse, search, add, and rate study-friendly cafes from the terminal.
//! Each device may rate a given cafe once per cooldown window.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod shell;
mod state;
mod viewmodel;

#[derive(Parser, Debug)]
#[command(name = "cafe-directory")]
#[command(about = "Find and rate study-friendly cafes")]
struct Cli {
    /// Where the rating history database lives
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory configuration (TOML); defaults apply when missing
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive prompt (default)
    Interactive,
    /// List every cafe and exit
    List,
    /// Print cafes matching a query and exit
    Search { query: Vec<String> },
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting cafe directory");

    let mut app_state = match state::AppState::new(cli.data_dir, cli.config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            println!("Data directory: {}", app_state.data_dir().display());
            println!("Config: {}", app_state.config_path().display());
            shell::run(&mut app_state.directory).map_err(cafe_core::Error::from)
        }
        Commands::List => app_state
            .directory
            .cafes()
            .map(|cafes| println!("{}", viewmodel::render_list(&cafes))),
        Commands::Search { query } => app_state
            .directory
            .search(&query.join(" "))
            .map(|cafes| println!("{}", viewmodel::render_list(&cafes))),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
