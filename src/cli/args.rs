//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Crafting-tree quiz: guess what goes into an item, or what it costs
#[derive(Parser, Debug)]
#[command(name = "itemquiz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog JSON file (Data Dragon item.json)
    #[arg(short, long, global = true, env = "ITEMQUIZ_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Config file to use instead of the layered lookup
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// RNG seed for reproducible questions
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crafting quiz: select the options that go into the shown item
    Play {
        /// Number of rounds (default: until empty input)
        #[arg(short, long)]
        rounds: Option<usize>,
        /// Minimum crafting tree size override
        #[arg(long)]
        min_tree_size: Option<usize>,
        /// Number of options override
        #[arg(long)]
        options: Option<usize>,
    },

    /// Price quiz: guess the total price of the shown item
    Price {
        /// Number of rounds (default: until empty input)
        #[arg(short, long)]
        rounds: Option<usize>,
    },

    /// Show the crafting tree of an item
    Tree {
        /// Item id or exact name
        item: String,
    },

    /// Show parents, materials and extended family of an item
    Family {
        /// Item id or exact name
        item: String,
    },

    /// Show catalog statistics
    Stats,

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
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
