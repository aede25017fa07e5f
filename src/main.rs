mod commands;
mod prompt;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventbook_core::config::EventbookConfig;
use tracing_subscriber::EnvFilter;

use commands::{EventArgs, list::ListFilter};

#[derive(Parser)]
#[command(name = "eventbook")]
#[command(about = "Record, edit and list venue events, and see which ones are behind you")]
struct Cli {
    /// Use this events file instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events in the order they were added
    List {
        /// Only events that haven't happened yet
        #[arg(long, conflicts_with = "past")]
        upcoming: bool,

        /// Only events whose date has passed
        #[arg(long)]
        past: bool,
    },
    /// Show every field of one event
    Show { id: String },
    /// Record a new event (prompts for anything required that isn't given)
    Add(EventArgs),
    /// Change an event; fields not given keep their current value
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Keep running and report events as their date passes
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = EventbookConfig::load()?;
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }

    match cli.command {
        Commands::List { upcoming, past } => {
            let filter = if upcoming {
                ListFilter::Upcoming
            } else if past {
                ListFilter::Past
            } else {
                ListFilter::All
            };
            commands::list::run(&config, filter)
        }
        Commands::Show { id } => commands::show::run(&config, &id.as_str().into()),
        Commands::Add(fields) => commands::add::run(&config, fields),
        Commands::Edit { id, fields } => commands::edit::run(&config, &id.as_str().into(), fields),
        Commands::Delete { id, yes } => commands::delete::run(&config, &id.as_str().into(), yes),
        Commands::Watch => commands::watch::run(&config).await,
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
