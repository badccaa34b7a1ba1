pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod interactor;
pub mod rest;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::Mozo;
pub use config::MozoConfig;
pub use error::{MozoError, Result};

// Collaborator seams
pub use api::ApiClient;
pub use rest::MozoHttpClient;
pub use store::{FileStore, MemoryStore, SessionStore, TokenStore};

// Session + events
pub use events::{AuthEvent, AuthEvents};
pub use session::SessionContext;

// Flows
pub use interactor::{
    AuthCompletion, BootstrapOutcome, BootstrapState, ConvenienceDownloads, CoreInteractor,
    DownloadOutcome, LinkOutcome, Module,
};

// Wire + display types
pub use types::{
    Contact, CurrencyType, DisplayItem, ExchangeRateInfo, TokenInfo, User, UserProfile, WalletInfo,
    EMPTY_EXCHANGE_LABEL,
};
