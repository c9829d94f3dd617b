mod commands;
mod config;
mod context;
mod diagnostics;
mod error;
mod ignore;
mod parser;
mod paths;
mod resolver;
mod root;
mod search;
mod session;
mod socket;
mod store;
mod types;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::ListFormat;

/// Environment variable holding the log filter, e.g. `bacon_nav=debug`.
const LOG_ENV: &str = "BACON_NAV_LOG";

#[derive(Parser)]
#[command(name = "bacon-nav", about = "Navigate bacon diagnostics and drive bacon through its socket")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the locations and print them
    List {
        /// Print a JSON array
        #[arg(long, conflicts_with = "quickfix")]
        json: bool,
        /// Print `path:line:column: category: text` lines for a quickfix list
        #[arg(long)]
        quickfix: bool,
    },
    /// Print the locations file that would be loaded
    Locate,
    /// Send an action to the running bacon (e.g. `job:clippy`)
    Send {
        /// Action string passed to `bacon --send`
        action: String,
    },
    /// Read commands from stdin against one long-lived state
    Session,
    /// Print the directory of the running bacon's socket
    Socket,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { json, quickfix } => {
            let format = if json {
                ListFormat::Json
            } else if quickfix {
                ListFormat::Quickfix
            } else {
                ListFormat::Plain
            };
            commands::list(format)
        },
        Commands::Locate => commands::locate(),
        Commands::Send { action } => commands::send(&action),
        Commands::Session => commands::session(),
        Commands::Socket => commands::socket(),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            // Nothing-to-act-on outcomes (1) are distinct from runtime faults (3).
            if e.is_resolution_failure() {
                ExitCode::FAILURE
            } else {
                ExitCode::from(3_u8)
            }
        },
    };
}

/// Install a stderr subscriber filtered by `BACON_NAV_LOG`, warnings only by default.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| return EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // A subscriber can only be missing here if one was already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
