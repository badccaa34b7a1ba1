use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MozoError;

/// Fiat currency used for exchange rate display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyType {
    #[default]
    Krw,
    Usd,
}

impl CurrencyType {
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyType::Krw => "KRW",
            CurrencyType::Usd => "USD",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            CurrencyType::Krw => "₩",
            CurrencyType::Usd => "$",
        }
    }

    /// Decimal places kept when displaying a converted amount.
    pub fn decimal_round(&self) -> u32 {
        match self {
            CurrencyType::Krw => 0,
            CurrencyType::Usd => 2,
        }
    }
}

impl fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyType {
    type Err = MozoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "KRW" => Ok(CurrencyType::Krw),
            "USD" => Ok(CurrencyType::Usd),
            other => Err(MozoError::Validation(format!("unsupported currency: {other}"))),
        }
    }
}

/// Exchange rate returned by `GET /exchange/rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateInfo {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl ExchangeRateInfo {
    /// Currency and rate, if both are present and the currency is known.
    pub fn usable(&self) -> Option<(CurrencyType, Decimal)> {
        let currency = self.currency.as_deref()?.parse().ok()?;
        Some((currency, self.rate?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_parse_case_insensitive() {
        assert_eq!("krw".parse::<CurrencyType>().unwrap(), CurrencyType::Krw);
        assert_eq!(" USD ".parse::<CurrencyType>().unwrap(), CurrencyType::Usd);
        assert!("EUR".parse::<CurrencyType>().is_err());
    }

    #[test]
    fn test_usable_rate() {
        let info = ExchangeRateInfo {
            currency: Some("krw".into()),
            rate: Some(dec!(1150.5)),
        };
        assert_eq!(info.usable(), Some((CurrencyType::Krw, dec!(1150.5))));

        let missing_rate = ExchangeRateInfo {
            currency: Some("KRW".into()),
            rate: None,
        };
        assert_eq!(missing_rate.usable(), None);

        let unknown = ExchangeRateInfo {
            currency: Some("JPY".into()),
            rate: Some(dec!(1)),
        };
        assert_eq!(unknown.usable(), None);
    }
}
