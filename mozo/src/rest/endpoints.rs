use async_trait::async_trait;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::rest::MozoHttpClient;
use crate::types::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkAnonymousRequest<'a> {
    anonymous_address: &'a str,
}

impl MozoHttpClient {
    // --- User ---

    /// GET /user-profile - Profile of the token's owner.
    pub async fn get_user_profile(&self) -> Result<UserProfile> {
        self.get("/user-profile", &[]).await
    }

    // --- Balance ---

    /// GET /solo/contract/solo-token/balance/{address} - Off-chain balance.
    pub async fn get_token_info(&self, address: &str) -> Result<TokenInfo> {
        self.get(&format!("/solo/contract/solo-token/balance/{address}"), &[])
            .await
    }

    /// GET /exchange/rate?currency= - Rate for converting balances to fiat.
    pub async fn get_exchange_rate(&self, currency: CurrencyType) -> Result<ExchangeRateInfo> {
        self.get("/exchange/rate", &[("currency", currency.code())])
            .await
    }

    // --- Address book ---

    /// GET /contacts - Saved address book entries.
    pub async fn get_address_book(&self) -> Result<Vec<Contact>> {
        self.get("/contacts", &[]).await
    }

    // --- Anonymous wallet ---

    /// POST /anonymous/link - Transfer anonymous holdings to the current user.
    pub async fn link_anonymous_holdings(&self, anonymous_address: &str) -> Result<()> {
        self.post(
            "/anonymous/link",
            &LinkAnonymousRequest { anonymous_address },
        )
        .await
    }
}

#[async_trait]
impl ApiClient for MozoHttpClient {
    async fn get_user_profile(&self) -> Result<UserProfile> {
        MozoHttpClient::get_user_profile(self).await
    }

    async fn get_token_info(&self, address: &str) -> Result<TokenInfo> {
        MozoHttpClient::get_token_info(self, address).await
    }

    async fn get_exchange_rate(&self, currency: CurrencyType) -> Result<ExchangeRateInfo> {
        MozoHttpClient::get_exchange_rate(self, currency).await
    }

    async fn get_address_book(&self) -> Result<Vec<Contact>> {
        MozoHttpClient::get_address_book(self).await
    }

    async fn link_anonymous_holdings(&self, anonymous_address: &str) -> Result<()> {
        MozoHttpClient::link_anonymous_holdings(self, anonymous_address).await
    }
}
