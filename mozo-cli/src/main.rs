mod cli;
mod client;
mod error;
mod output;

use std::future::Future;

use clap::Parser;
use cli::{AuthArgs, BalanceArgs, BootstrapArgs, Command};
use error::CliError;
use mozo::{DisplayItem, DownloadOutcome, Mozo, MozoError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    let _ = dotenvy::dotenv(); // load .env if present
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cancel = setup_signal_handlers();

    let mozo = match client::create_mozo_client(&cli) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "unable to create client");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Auth(args) => until_cancelled(&cancel, run_auth(&mozo, args)).await,
        Command::Bootstrap(args) => until_cancelled(&cancel, run_bootstrap(&mozo, args)).await,
        Command::Balance(args) => until_cancelled(&cancel, run_balance(&mozo, args)).await,
        Command::Logout => mozo.logout().map_err(CliError::from),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run_auth(mozo: &Mozo, args: AuthArgs) -> Result<(), CliError> {
    let token = args.token.ok_or(CliError::MissingToken)?;
    if let Some(address) = args.anonymous_address {
        mozo.context().set_anonymous_address(Some(address));
    }

    let completion = mozo.authenticate(Some(token)).await?;
    info!(user_id = %completion.user.id, link = ?completion.link, "signed in");
    println!(
        "{}\twallet-ready={}",
        completion.user.id,
        completion.user.wallet_ready()
    );

    // The caches die with the process; wait only to report failed downloads.
    if let Some(downloads) = completion.downloads {
        let (address_book, exchange_rate) = downloads.join().await;
        for (name, outcome) in [("address book", address_book), ("exchange rate", exchange_rate)] {
            if let DownloadOutcome::SoftFailure { reason } = outcome {
                warn!(download = name, %reason, "background download failed");
            }
        }
    }
    Ok(())
}

async fn run_bootstrap(mozo: &Mozo, args: BootstrapArgs) -> Result<(), CliError> {
    let outcome = mozo.check_for_authentication(args.module).await?;
    println!("{}", output::describe_outcome(&outcome));
    Ok(())
}

/// Print the balance; like the balance widget, a failed load renders the
/// empty item instead of aborting.
async fn run_balance(mozo: &Mozo, args: BalanceArgs) -> Result<(), CliError> {
    let item = match mozo.load_balance_info().await {
        Ok(item) => item,
        Err(MozoError::NotAuthenticated) => {
            warn!("not signed in, run `mozo auth` first");
            DisplayItem::empty()
        }
        Err(e) => {
            warn!(error = %e, "unable to load balance");
            DisplayItem::empty()
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_balance(&item, args.json, &mut out)
}

async fn until_cancelled<F>(cancel: &CancellationToken, fut: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    tokio::select! {
        res = fut => res,
        _ = cancel.cancelled() => Err(CliError::Interrupted),
    }
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            let mut sig = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to register SIGTERM handler");
            sig.recv().await;
            info!("received SIGTERM, shutting down");
            cancel_clone.cancel();
        });
    }

    cancel
}
