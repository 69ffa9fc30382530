use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "umbra",
    about = "Umbra — chat-bot economy ledger and pet registry",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory from the configuration
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Inspect or change user balances
    Balance(BalanceArgs),
    /// Run an interactive command shell against one guild
    Shell(ShellArgs),
    /// Start the dashboard server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct BalanceArgs {
    #[command(subcommand)]
    pub action: BalanceAction,
}

#[derive(Subcommand)]
pub enum BalanceAction {
    /// Show a user's balance (creates a zero record for new users)
    Get { user: String },
    /// Add coins to a user
    Credit {
        user: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Remove coins from a user, stopping at zero
    Debit {
        user: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Overwrite a user's balance
    Set {
        user: String,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// List balances, highest first
    List {
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
}

#[derive(Args)]
pub struct ShellArgs {
    /// Guild the shell acts in
    #[arg(short, long, default_value = "local")]
    pub guild: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the bind address from the configuration
    #[arg(long)]
    pub bind: Option<String>,
}
