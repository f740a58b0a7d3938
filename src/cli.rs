//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabclip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy a table from a report page as Markdown
    Table {
        /// Report page (HTML file)
        file: PathBuf,

        /// Id of the table element
        table_id: String,

        /// Print the Markdown instead of copying it
        #[arg(long)]
        stdout: bool,

        /// Escape '|' and line breaks in cells
        #[arg(long)]
        escape: bool,

        /// Also copy an HTML rendering of the table
        #[arg(long)]
        rich: bool,

        /// Refuse to copy a table whose columns would not line up
        #[arg(long)]
        strict: bool,
    },

    /// Copy a report page's JSON export verbatim
    Json {
        /// Report page (HTML file)
        file: PathBuf,

        /// Id of the element holding the payload
        #[arg(short, long)]
        element: Option<String>,

        /// Print the payload instead of copying it
        #[arg(long)]
        stdout: bool,
    },

    /// List the tables in a report page or a directory of pages
    List {
        /// Report page or directory
        path: PathBuf,
    },

    /// Settings file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings as JSON
    Show,

    /// Print the settings file location
    Path,

    /// Write default settings to the settings file
    Reset,
}
