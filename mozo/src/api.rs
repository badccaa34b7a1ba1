use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Contact, CurrencyType, ExchangeRateInfo, TokenInfo, UserProfile};

/// Backend calls the interactor depends on.
///
/// [`crate::rest::MozoHttpClient`] is the production implementation; tests
/// swap in a fake.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get_user_profile(&self) -> Result<UserProfile>;

    async fn get_token_info(&self, address: &str) -> Result<TokenInfo>;

    async fn get_exchange_rate(&self, currency: CurrencyType) -> Result<ExchangeRateInfo>;

    async fn get_address_book(&self) -> Result<Vec<Contact>>;

    /// Move holdings of an anonymous wallet to the signed-in user.
    async fn link_anonymous_holdings(&self, anonymous_address: &str) -> Result<()>;
}
