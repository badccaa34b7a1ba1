//! Authentication bootstrap, post-auth handling and balance loading.
//!
//! # Bootstrap
//!
//! [`CoreInteractor::check_for_authentication`] classifies the session into a
//! [`BootstrapState`] and maps it onto exactly one [`BootstrapOutcome`]:
//!
//! | state                 | outcome                    | network        |
//! |-----------------------|----------------------------|----------------|
//! | `NoToken`             | `ContinueUnauthenticated`  | none           |
//! | `TokenUserWithWallet` | `Continue`                 | none           |
//! | `TokenUserNoWallet`   | `ContinueWithWalletSetup`  | none           |
//! | `TokenNoUser`         | `Continue`                 | profile fetch  |
//!
//! A failed profile fetch produces no outcome: the call returns
//! [`MozoError::ProfileUnavailable`] and leaves the session untouched. There
//! is no retry; the caller decides.
//!
//! # Background downloads
//!
//! The address book and exchange rate downloads are spawned on the tokio
//! runtime and never awaited by the flow that started them. Their failures
//! are reported as [`DownloadOutcome::SoftFailure`] and logged. A download
//! that completes after the session was cleared reports
//! [`DownloadOutcome::Discarded`] and leaves the caches empty.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::error::{MozoError, Result};
use crate::events::{AuthEvent, AuthEvents};
use crate::session::SessionContext;
use crate::types::{CurrencyType, DisplayItem, User};
use crate::utils::short_address;

/// SDK feature that asked for the authentication check; handed back with the
/// outcome so the caller resumes the right flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Module {
    #[default]
    Wallet,
    Transaction,
    TxHistory,
    AddressBook,
    Payment,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Wallet => "wallet",
            Module::Transaction => "transaction",
            Module::TxHistory => "tx-history",
            Module::AddressBook => "address-book",
            Module::Payment => "payment",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = MozoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "wallet" => Ok(Module::Wallet),
            "transaction" => Ok(Module::Transaction),
            "tx-history" => Ok(Module::TxHistory),
            "address-book" => Ok(Module::AddressBook),
            "payment" => Ok(Module::Payment),
            other => Err(MozoError::Validation(format!("unknown module: {other}"))),
        }
    }
}

/// Authentication state read from the session before bootstrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    NoToken,
    TokenNoUser,
    TokenUserNoWallet,
    TokenUserWithWallet,
}

impl BootstrapState {
    pub fn detect(ctx: &SessionContext) -> Self {
        if ctx.access_token().is_none() {
            return BootstrapState::NoToken;
        }
        match ctx.current_user() {
            None => BootstrapState::TokenNoUser,
            Some(user) if user.wallet_ready() => BootstrapState::TokenUserWithWallet,
            Some(_) => BootstrapState::TokenUserNoWallet,
        }
    }
}

/// Result of the bootstrap check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Authenticated with a ready wallet.
    Continue(Module),
    /// Authenticated, but the wallet still needs to be set up.
    ContinueWithWalletSetup(Module),
    /// No access token: proceed anonymously without blocking.
    ContinueUnauthenticated(Module),
}

impl BootstrapOutcome {
    pub fn module(&self) -> Module {
        match *self {
            BootstrapOutcome::Continue(m)
            | BootstrapOutcome::ContinueWithWalletSetup(m)
            | BootstrapOutcome::ContinueUnauthenticated(m) => m,
        }
    }
}

/// Result of a best-effort background download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Stored,
    SoftFailure { reason: String },
    /// The session was cleared while the request was in flight.
    Discarded,
}

/// Result of linking anonymous holdings to the new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    NothingToLink,
    Linked { address: String },
    SoftFailure { reason: String },
}

/// Handles for the two background downloads.
///
/// Dropping this detaches the tasks; they still run to completion.
#[derive(Debug)]
pub struct ConvenienceDownloads {
    pub address_book: JoinHandle<DownloadOutcome>,
    pub exchange_rate: JoinHandle<DownloadOutcome>,
}

impl ConvenienceDownloads {
    /// Wait for both downloads. Returns `(address_book, exchange_rate)`.
    pub async fn join(self) -> (DownloadOutcome, DownloadOutcome) {
        let address_book = self.address_book.await;
        let exchange_rate = self.exchange_rate.await;
        (flatten_join(address_book), flatten_join(exchange_rate))
    }
}

fn flatten_join(
    res: std::result::Result<DownloadOutcome, tokio::task::JoinError>,
) -> DownloadOutcome {
    res.unwrap_or_else(|e| DownloadOutcome::SoftFailure {
        reason: format!("download task failed: {e}"),
    })
}

/// Completion of [`CoreInteractor::handle_after_auth`].
#[derive(Debug)]
pub struct AuthCompletion {
    pub user: User,
    pub link: LinkOutcome,
    /// `None` when no token was stored, so nothing was downloaded.
    pub downloads: Option<ConvenienceDownloads>,
}

/// Drives the authentication and balance flows against an [`ApiClient`].
#[derive(Clone)]
pub struct CoreInteractor {
    api: Arc<dyn ApiClient>,
    events: AuthEvents,
    currency: CurrencyType,
}

impl CoreInteractor {
    pub fn new(api: Arc<dyn ApiClient>, events: AuthEvents, currency: CurrencyType) -> Self {
        Self {
            api,
            events,
            currency,
        }
    }

    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    /// Fetch the profile and cache it as the current user.
    async fn fetch_user_profile(&self, ctx: &SessionContext) -> Result<User> {
        info!("loading user profile");
        let profile = self.api.get_user_profile().await.map_err(|e| {
            error!(error = %e, "unable to load user profile");
            MozoError::ProfileUnavailable(Box::new(e))
        })?;

        let user = User::from_profile(profile);
        ctx.save_current_user(user.clone())?;
        debug!(user_id = %user.id, wallet_ready = user.wallet_ready(), "user profile cached");
        Ok(user)
    }

    /// Decide how `module` may proceed given the stored token and user.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::ProfileUnavailable` when a token exists, no user is
    /// cached and the profile fetch fails. No outcome is produced in that case.
    pub async fn check_for_authentication(
        &self,
        ctx: &SessionContext,
        module: Module,
    ) -> Result<BootstrapOutcome> {
        let state = BootstrapState::detect(ctx);
        debug!(?state, %module, "checking authentication");

        let outcome = match state {
            BootstrapState::NoToken => BootstrapOutcome::ContinueUnauthenticated(module),
            BootstrapState::TokenUserWithWallet => BootstrapOutcome::Continue(module),
            BootstrapState::TokenUserNoWallet => BootstrapOutcome::ContinueWithWalletSetup(module),
            BootstrapState::TokenNoUser => {
                self.fetch_user_profile(ctx).await?;
                BootstrapOutcome::Continue(module)
            }
        };

        info!(?outcome, "authentication checked");
        Ok(outcome)
    }

    /// Handle a fresh access token from the auth callback.
    ///
    /// Persists the token, spawns the convenience downloads, links anonymous
    /// holdings, then fetches the profile. Completion is returned only once
    /// the profile is cached.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::ProfileUnavailable` if the profile fetch fails; the
    /// token stays saved and spawned downloads keep running.
    pub async fn handle_after_auth(
        &self,
        ctx: &Arc<SessionContext>,
        access_token: Option<String>,
    ) -> Result<AuthCompletion> {
        ctx.save_token(access_token)?;

        let downloads = self.download_convenience_data(ctx);
        let link = self.link_anonymous_holdings(ctx).await;
        let user = self.fetch_user_profile(ctx).await?;

        info!(user_id = %user.id, ?link, "authentication handled");
        Ok(AuthCompletion {
            user,
            link,
            downloads,
        })
    }

    /// Spawn the address book and exchange rate downloads.
    ///
    /// Returns `None` without spawning anything when no token is stored.
    pub fn download_convenience_data(
        &self,
        ctx: &Arc<SessionContext>,
    ) -> Option<ConvenienceDownloads> {
        if ctx.access_token().is_none() {
            debug!("no access token, skipping convenience downloads");
            return None;
        }

        let generation = ctx.generation();

        let api = Arc::clone(&self.api);
        let session = Arc::clone(ctx);
        let address_book = tokio::spawn(async move {
            download_address_book(api.as_ref(), &session, generation).await
        });

        let api = Arc::clone(&self.api);
        let session = Arc::clone(ctx);
        let currency = self.currency;
        let exchange_rate = tokio::spawn(async move {
            download_exchange_rate(api.as_ref(), &session, generation, currency).await
        });

        Some(ConvenienceDownloads {
            address_book,
            exchange_rate,
        })
    }

    /// Transfer holdings of the anonymous wallet, if any, to the current user.
    pub async fn link_anonymous_holdings(&self, ctx: &SessionContext) -> LinkOutcome {
        let Some(address) = ctx.anonymous_address() else {
            return LinkOutcome::NothingToLink;
        };

        match self.api.link_anonymous_holdings(&address).await {
            Ok(()) => {
                ctx.set_anonymous_address(None);
                info!(address = %short_address(&address), "anonymous holdings linked");
                LinkOutcome::Linked { address }
            }
            Err(e) => {
                warn!(address = %short_address(&address), error = %e, "anonymous link failed");
                LinkOutcome::SoftFailure {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Load the balance of the current user's off-chain wallet.
    ///
    /// Uses the cached exchange rate when present; otherwise fetches and
    /// caches one. A failed rate fetch still returns the balance, just
    /// without exchange context.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::NotAuthenticated` without any network call when no
    /// user with an off-chain address is cached. Balance fetch failures are
    /// returned as-is.
    pub async fn load_balance_info(&self, ctx: &SessionContext) -> Result<DisplayItem> {
        let address = ctx
            .current_user()
            .and_then(|u| u.offchain_address().map(str::to_owned))
            .ok_or(MozoError::NotAuthenticated)?;
        let generation = ctx.generation();

        debug!(address = %short_address(&address), "loading balance");
        let token_info = self.api.get_token_info(&address).await?;
        let item = DisplayItem::from_token_info(&token_info, &address)?;

        if ctx.exchange_rate().is_none() {
            download_exchange_rate(self.api.as_ref(), ctx, generation, self.currency).await;
        }

        Ok(item.with_exchange_rate(ctx.exchange_rate()))
    }

    pub fn notify_auth_success(&self) -> usize {
        self.events.notify(AuthEvent::AuthSucceeded)
    }

    pub fn notify_logout(&self) -> usize {
        self.events.notify(AuthEvent::LoggedOut)
    }

    /// Clear the session and tell observers.
    pub fn logout(&self, ctx: &SessionContext) -> Result<()> {
        ctx.clear()?;
        self.notify_logout();
        Ok(())
    }
}

impl fmt::Debug for CoreInteractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreInteractor")
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// Download the address book into the session cache, unless the session
/// moved past `generation` in the meantime.
pub async fn download_address_book(
    api: &dyn ApiClient,
    ctx: &SessionContext,
    generation: u64,
) -> DownloadOutcome {
    debug!("loading address book");
    match api.get_address_book().await {
        Ok(contacts) => {
            let count = contacts.len();
            if !ctx.store_address_book(generation, contacts) {
                debug!("session cleared, address book discarded");
                return DownloadOutcome::Discarded;
            }
            debug!(count, "address book cached");
            DownloadOutcome::Stored
        }
        Err(e) => {
            warn!(error = %e, "unable to load address book");
            DownloadOutcome::SoftFailure {
                reason: e.to_string(),
            }
        }
    }
}

/// Download the exchange rate for `currency` into the session cache, unless
/// the session moved past `generation` in the meantime.
pub async fn download_exchange_rate(
    api: &dyn ApiClient,
    ctx: &SessionContext,
    generation: u64,
    currency: CurrencyType,
) -> DownloadOutcome {
    debug!(%currency, "loading exchange rate");
    match api.get_exchange_rate(currency).await {
        Ok(rate) => {
            debug!(?rate, "exchange rate received");
            if !ctx.store_exchange_rate(generation, rate) {
                debug!(%currency, "session cleared, exchange rate discarded");
                return DownloadOutcome::Discarded;
            }
            DownloadOutcome::Stored
        }
        Err(e) => {
            warn!(%currency, error = %e, "unable to load exchange rate");
            DownloadOutcome::SoftFailure {
                reason: e.to_string(),
            }
        }
    }
}
