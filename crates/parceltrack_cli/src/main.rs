//! Command-line front end for the parcel tracker.
//!
//! # Responsibility
//! - Map subcommands onto the tracker tool surface and print its text.
//! - Configure store location and optional file logging.

use clap::{Parser, Subcommand};
use log::info;
use parceltrack_core::{default_log_level, init_logging, LogSettings, LOG_DIR_ENV};
use parceltrack_tools::{catalog, resolve_store_path, PackageTools};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "parceltrack")]
#[command(about = "Track parcels, couriers and delivery dates", version)]
struct Cli {
    /// Package store file (defaults to $PARCELTRACK_STORE_PATH or ./packages.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = LOG_DIR_ENV)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a package to track
    Add {
        name: String,
        courier: String,
        tracking_number: String,
        /// Expected delivery date (YYYY-MM-DD)
        #[arg(long)]
        eta: Option<String>,
    },
    /// Update the delivery status of a package
    Update {
        tracking_number: String,
        status: String,
    },
    /// List all packages with their current status
    List,
    /// Show packages past their ETA that are not delivered
    Overdue,
    /// Show delivered packages
    Delivered,
    /// Print the delivery summary prompt
    Summary,
    /// Print the tool catalog as JSON
    Tools,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let tools = PackageTools::new(resolve_store_path(cli.store.as_deref()));
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    let output = match cli.command {
        Commands::Add {
            name,
            courier,
            tracking_number,
            eta,
        } => tools.add_package(&name, &courier, &tracking_number, eta.as_deref()),
        Commands::Update {
            tracking_number,
            status,
        } => tools.update_status(&tracking_number, &status),
        Commands::List => tools.list_all_packages(),
        Commands::Overdue => tools.check_overdue_packages(),
        Commands::Delivered => tools.delivered_packages(),
        Commands::Summary => tools.delivery_summary_prompt(),
        Commands::Tools => match serde_json::to_string_pretty(catalog()) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("Error: failed to encode catalog: {err}");
                std::process::exit(1);
            }
        },
    };

    println!("{output}");
}

fn setup_logging(cli: &Cli) -> Result<(), String> {
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    match cli.log_dir.as_deref() {
        Some(dir) if !dir.trim().is_empty() => init_logging(&LogSettings::parse(level, dir)?),
        _ => Ok(()),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Add { .. } => "add",
        Commands::Update { .. } => "update",
        Commands::List => "list",
        Commands::Overdue => "overdue",
        Commands::Delivered => "delivered",
        Commands::Summary => "summary",
        Commands::Tools => "tools",
    }
}

#[cfg(test)]
mod tests {
    use super::{command_name, Cli};
    use clap::Parser;
    use parceltrack_core::LOG_DIR_ENV;

    #[test]
    fn log_dir_falls_back_to_env_and_flag_wins() {
        std::env::set_var(LOG_DIR_ENV, "/var/log/parceltrack");
        let cli = Cli::try_parse_from(["parceltrack", "list"]).unwrap();
        assert_eq!(cli.log_dir.as_deref(), Some("/var/log/parceltrack"));
        assert_eq!(command_name(&cli.command), "list");

        let cli = Cli::try_parse_from(["parceltrack", "--log-dir", "/tmp/logs", "summary"]).unwrap();
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/logs"));

        std::env::remove_var(LOG_DIR_ENV);
        let cli = Cli::try_parse_from(["parceltrack", "update", "TN1", "delivered"]).unwrap();
        assert_eq!(cli.log_dir, None);
    }
}
