//! tabclip - Main Entry Point
//!
//! Copies tables from generated HTML report pages to the clipboard as
//! Markdown, and copies their JSON exports verbatim.

mod cli;
mod commands;
mod config;
mod error;
mod export;
mod files;
mod markdown;
mod page;
mod string_utils;

use clap::Parser;
use cli::{Cli, Commands, ConfigCommands};
use config::load_config;
use error::Error;
use export::{Destination, JsonExportOptions, TableExportOptions};
use log::debug;
use markdown::CellEscaping;

/// Application name constant.
const APP_NAME: &str = "tabclip";

fn destination(stdout: bool) -> Destination {
    if stdout {
        Destination::Stdout
    } else {
        Destination::Clipboard
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    debug!("Starting {}", APP_NAME);

    let settings = load_config();

    let result = match cli.command {
        Commands::Table {
            file,
            table_id,
            stdout,
            escape,
            rich,
            strict,
        } => {
            let mut options = TableExportOptions::from_settings(&settings)
                .with_destination(destination(stdout));
            // Flags only switch features on; settings may already have them on
            if escape {
                options = options.with_escaping(CellEscaping::Gfm);
            }
            if rich {
                options = options.with_rich(true);
            }
            if strict {
                options = options.with_strict(true);
            }
            commands::run_table(&settings, &file, &table_id, &options)
        }
        Commands::Json {
            file,
            element,
            stdout,
        } => {
            let mut options =
                JsonExportOptions::from_settings(&settings).with_destination(destination(stdout));
            if let Some(id) = element {
                options = options.with_element_id(id);
            }
            commands::run_json(&settings, &file, &options)
        }
        Commands::List { path } => commands::run_list(&settings, &path),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => commands::run_config_show(&settings),
            ConfigCommands::Path => commands::run_config_path(),
            ConfigCommands::Reset => commands::run_config_reset(),
        },
    };

    match result {
        Ok(()) => {}
        // Already reported by the notifier
        Err(Error::Clipboard(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Error::MalformedTable { issues, .. } = &e {
                for issue in issues {
                    eprintln!("  {}", issue);
                }
                eprintln!("Use --escape to escape '|' and line breaks in cells.");
            }
            std::process::exit(1);
        }
    }
}
