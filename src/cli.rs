use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shellguard",
    version,
    about = "Review shell commands for danger, run them with confirmation, and suggest undos"
)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a command without running it
    Check {
        /// Shell command to classify
        command: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how a command could be reversed
    Undo {
        /// Shell command to derive an undo for
        command: String,

        /// Print the suggestion as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a command, asking for confirmation first if it is dangerous
    Run {
        /// Shell command to execute
        command: String,

        /// Skip the confirmation prompt for dangerous commands
        #[arg(short, long)]
        yes: bool,

        /// Command timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Shell used to run the command (e.g., "bash", "/bin/zsh")
        #[arg(long)]
        shell: Option<String>,

        /// Do not print an undo hint afterwards
        #[arg(long)]
        no_undo_hint: bool,
    },
    /// List, search, or clear recently executed commands
    History {
        /// Maximum number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Only show entries whose command contains this text (case-insensitive)
        #[arg(short, long, conflicts_with = "clear")]
        search: Option<String>,

        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },
}
