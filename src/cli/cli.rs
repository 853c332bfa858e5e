use clap::{Parser, Subcommand};

use crate::application::data::{Backing, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the components and serializations of a masked name
    Inspect {
        name: String,
        #[clap(long, short, default_value = ".")]
        delimiter: char,
        #[clap(long, short, default_value = "array", value_enum)]
        backing: Backing,
    },
    /// Render a masked name with another delimiter
    Convert {
        name: String,
        #[clap(long, short, default_value = ".")]
        delimiter: char,
        /// Target delimiter; an empty string concatenates the components
        #[clap(long, short)]
        to: String,
    },
    /// Create `/`-separated paths under the root node and print the tree
    Tree {
        /// The last segment of each path becomes a file
        paths: Vec<String>,
        /// Base name to search for after building the tree
        #[clap(long, short)]
        find: Option<String>,
    },
}
