use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mozo::{CurrencyType, Module};

/// mozo: drive the Mozo wallet SDK from a terminal.
#[derive(Parser, Debug)]
#[command(name = "mozo", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Backend base URL
    #[arg(long, env = "MOZO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// File holding the access token and cached user
    #[arg(long, env = "MOZO_STATE_FILE", default_value = "mozo-session.json", global = true)]
    pub state_file: PathBuf,

    /// Currency for exchange rates (KRW, USD)
    #[arg(long, env = "MOZO_CURRENCY", default_value = "KRW", global = true)]
    pub currency: CurrencyType,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store an access token, link anonymous holdings and load the profile
    Auth(AuthArgs),

    /// Check authentication and wallet state for a module
    Bootstrap(BootstrapArgs),

    /// Show the wallet balance and its exchange value
    Balance(BalanceArgs),

    /// Clear the stored session
    Logout,
}

/// Arguments for the `auth` subcommand.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    /// Access token from the identity provider
    #[arg(long, env = "MOZO_ACCESS_TOKEN")]
    pub token: Option<String>,

    /// Address of a wallet created before signing in
    #[arg(long)]
    pub anonymous_address: Option<String>,
}

/// Arguments for the `bootstrap` subcommand.
#[derive(Parser, Debug)]
pub struct BootstrapArgs {
    /// Module requesting the check (wallet, transaction, tx-history, address-book, payment)
    #[arg(long, default_value = "wallet")]
    pub module: Module,
}

/// Arguments for the `balance` subcommand.
#[derive(Parser, Debug)]
pub struct BalanceArgs {
    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}
