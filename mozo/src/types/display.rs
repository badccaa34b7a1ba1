use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::exchange::{CurrencyType, ExchangeRateInfo};
use super::token::TokenInfo;
use crate::error::Result;

/// Label shown when no converted amount can be computed.
pub const EMPTY_EXCHANGE_LABEL: &str = "0.0";

/// Balance + address pair rendered by balance widgets.
///
/// Recomputed on every load and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub balance: Decimal,
    pub address: String,
    /// Absent when the rate could not be fetched; the balance is still valid.
    pub exchange_rate: Option<ExchangeRateInfo>,
}

impl DisplayItem {
    /// Item shown when no data could be loaded.
    pub fn empty() -> Self {
        Self {
            balance: Decimal::ZERO,
            address: String::new(),
            exchange_rate: None,
        }
    }

    /// Build an item from a balance response. `requested_address` is used when
    /// the response does not echo the address back.
    pub fn from_token_info(info: &TokenInfo, requested_address: &str) -> Result<Self> {
        Ok(Self {
            balance: info.display_balance()?,
            address: info
                .address
                .clone()
                .unwrap_or_else(|| requested_address.to_string()),
            exchange_rate: None,
        })
    }

    pub fn with_exchange_rate(mut self, rate: Option<ExchangeRateInfo>) -> Self {
        self.exchange_rate = rate;
        self
    }

    /// Balance converted into the rate's currency, rounded half away from zero
    /// to the currency's display precision.
    pub fn exchange_value(&self) -> Option<(CurrencyType, Decimal)> {
        let (currency, rate) = self.exchange_rate.as_ref()?.usable()?;
        let value = self
            .balance
            .checked_mul(rate)?
            .round_dp_with_strategy(
                currency.decimal_round(),
                RoundingStrategy::MidpointAwayFromZero,
            )
            .normalize();
        Some((currency, value))
    }

    /// e.g. `₩115050.0` or `$12.35`; [`EMPTY_EXCHANGE_LABEL`] without a usable rate.
    ///
    /// Whole amounts keep one fractional digit so every label, the empty one
    /// included, has the same shape.
    pub fn exchange_label(&self) -> String {
        match self.exchange_value() {
            Some((currency, mut value)) => {
                if value.scale() == 0 {
                    value.rescale(1);
                }
                format!("{}{}", currency.unit(), value)
            }
            None => EMPTY_EXCHANGE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(currency: &str, rate: Decimal) -> Option<ExchangeRateInfo> {
        Some(ExchangeRateInfo {
            currency: Some(currency.into()),
            rate: Some(rate),
        })
    }

    #[test]
    fn test_from_token_info_scales_balance() {
        let info = TokenInfo {
            address: Some("0xabc".into()),
            balance: dec!(1234500),
            decimals: 2,
            symbol: Some("MOZO".into()),
        };
        let item = DisplayItem::from_token_info(&info, "0xother").unwrap();
        assert_eq!(item.balance, dec!(12345));
        assert_eq!(item.address, "0xabc");
        assert!(item.exchange_rate.is_none());
    }

    #[test]
    fn test_from_token_info_falls_back_to_requested_address() {
        let info = TokenInfo {
            address: None,
            balance: dec!(5),
            decimals: 0,
            symbol: None,
        };
        let item = DisplayItem::from_token_info(&info, "0xreq").unwrap();
        assert_eq!(item.address, "0xreq");
    }

    #[test]
    fn test_exchange_label_krw_rounds_to_whole() {
        let item = DisplayItem {
            balance: dec!(100.5),
            address: String::new(),
            exchange_rate: rate("KRW", dec!(1150.5)),
        };
        // 100.5 * 1150.5 = 115625.25
        assert_eq!(item.exchange_label(), "₩115625.0");
        assert_eq!(item.exchange_value().map(|(_, v)| v), Some(dec!(115625)));
    }

    #[test]
    fn test_exchange_label_usd_midpoint_away_from_zero() {
        let item = DisplayItem {
            balance: dec!(2.5),
            address: String::new(),
            exchange_rate: rate("usd", dec!(0.005)),
        };
        // 2.5 * 0.005 = 0.0125 -> 0.01
        assert_eq!(item.exchange_label(), "$0.01");

        let item = DisplayItem {
            balance: dec!(1),
            address: String::new(),
            exchange_rate: rate("USD", dec!(0.125)),
        };
        assert_eq!(item.exchange_label(), "$0.13");
    }

    #[test]
    fn test_exchange_label_whole_usd_keeps_one_digit() {
        let item = DisplayItem {
            balance: dec!(1500),
            address: String::new(),
            exchange_rate: rate("USD", dec!(0.50)),
        };
        assert_eq!(item.exchange_label(), "$750.0");

        let item = DisplayItem {
            balance: dec!(3),
            address: String::new(),
            exchange_rate: rate("USD", dec!(0.1)),
        };
        assert_eq!(item.exchange_label(), "$0.3");
    }

    #[test]
    fn test_exchange_label_without_rate() {
        let item = DisplayItem::empty();
        assert_eq!(item.exchange_label(), EMPTY_EXCHANGE_LABEL);

        let item = DisplayItem::empty().with_exchange_rate(Some(ExchangeRateInfo {
            currency: Some("KRW".into()),
            rate: None,
        }));
        assert_eq!(item.exchange_label(), EMPTY_EXCHANGE_LABEL);
    }
}
