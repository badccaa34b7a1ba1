//! Mozo client factory for the CLI.
//!
//! Wraps SDK initialisation into a single `create_mozo_client` call backed by
//! the on-disk session file.

use std::sync::Arc;
use std::time::Duration;

use mozo::{FileStore, Mozo, MozoConfig};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;

/// Backend used when neither `--api-url` nor `MOZO_API_URL` is given.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Build the SDK configuration from command-line flags.
pub fn config_from_cli(cli: &Cli) -> MozoConfig {
    let mut config = MozoConfig::new(cli.api_url.as_deref().unwrap_or(DEFAULT_API_URL));
    config.currency = cli.currency;
    config.request_timeout = Duration::from_secs(cli.timeout_secs);
    config
}

/// Create a client whose token and current user live in `cli.state_file`.
pub fn create_mozo_client(cli: &Cli) -> Result<Mozo, CliError> {
    let store = Arc::new(FileStore::open(&cli.state_file)?);
    info!(state_file = %store.path().display(), "session store opened");

    let mozo = Mozo::new(config_from_cli(cli), store.clone(), store)?;
    info!(anonymous = mozo.is_anonymous(), "mozo client ready");
    Ok(mozo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mozo::CurrencyType;

    #[test]
    fn test_config_from_cli_defaults() {
        let cli = Cli::try_parse_from(["mozo", "logout"]).unwrap();
        let config = config_from_cli(&cli);
        if std::env::var("MOZO_API_URL").is_err() {
            assert_eq!(config.api_base_url, DEFAULT_API_URL);
        }
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_from_cli_overrides() {
        let cli = Cli::try_parse_from([
            "mozo",
            "--api-url",
            "https://backend.example.com",
            "--currency",
            "usd",
            "--timeout-secs",
            "5",
            "balance",
            "--json",
        ])
        .unwrap();
        let config = config_from_cli(&cli);
        assert_eq!(config.api_base_url, "https://backend.example.com");
        assert_eq!(config.currency, CurrencyType::Usd);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
