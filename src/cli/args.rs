//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Generate real directory structures from text-based tree sketches
#[derive(Parser, Debug)]
#[command(name = "treefs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create directories and files from a tree sketch
    Create {
        /// Sketch file (default: stdin; paste mode on a terminal)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Destination directory
        #[arg(short, long, env = "TREEFS_DEST", value_hint = ValueHint::DirPath)]
        dest: Option<String>,

        /// Show what would be created without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Truncate existing files instead of skipping them
        #[arg(long)]
        overwrite: bool,

        /// Merge a single top-level folder into the destination
        #[arg(long)]
        collapse_root: bool,
    },

    /// Parse a sketch and print the recovered tree without touching disk
    Parse {
        /// Sketch file (default: stdin; paste mode on a terminal)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
