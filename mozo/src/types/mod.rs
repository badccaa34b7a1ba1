pub mod contact;
pub mod display;
pub mod exchange;
pub mod profile;
pub mod token;

pub use contact::Contact;
pub use display::{DisplayItem, EMPTY_EXCHANGE_LABEL};
pub use exchange::{CurrencyType, ExchangeRateInfo};
pub use profile::{User, UserProfile, WalletInfo};
pub use token::TokenInfo;
