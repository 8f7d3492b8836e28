mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("🚀 fepflow CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = dispatch(cli);
    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}

fn dispatch(cli: Cli) -> Result<()> {
    let load_configuration =
        || config::load_configuration(cli.config.as_deref(), &cli.set_values);

    match cli.command {
        Commands::Config(args) => {
            info!("Dispatching to 'config' command.");
            commands::config::run(args, &load_configuration()?)
        }
        Commands::Schedule(args) => {
            info!("Dispatching to 'schedule' command.");
            commands::schedule::run(args, &load_configuration()?)
        }
        Commands::Mdp(args) => {
            info!("Dispatching to 'mdp' command.");
            commands::mdp::run(args, &load_configuration()?)
        }
        Commands::Validate => {
            info!("Dispatching to 'validate' command.");
            commands::validate::run(&load_configuration()?)
        }
        Commands::Models(args) => {
            info!("Dispatching to 'models' command.");
            commands::models::run(args, &load_configuration()?)
        }
        Commands::Topfiles(args) => {
            info!("Dispatching to 'topfiles' command.");
            commands::topfiles::run(args)
        }
        Commands::Units(args) => {
            info!("Dispatching to 'units' command.");
            commands::units::run(args)
        }
    }
}
