use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::from_scaled;

/// Balance info returned for an off-chain address.
///
/// `balance` is the raw integer amount; divide by `10^decimals` for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    #[serde(default)]
    pub address: Option<String>,
    pub balance: Decimal,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl TokenInfo {
    pub fn display_balance(&self) -> Result<Decimal> {
        from_scaled(self.balance, self.decimals)
    }
}
