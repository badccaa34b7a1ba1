use std::io::Write;

use mozo::{BootstrapOutcome, DisplayItem};
use serde::Serialize;

use crate::error::CliError;

#[derive(Serialize)]
struct BalanceJson<'a> {
    address: &'a str,
    balance: String,
    exchange: String,
    currency: Option<&'static str>,
}

/// Write a balance line: TSV `address \t balance \t exchange`, or JSON.
pub fn write_balance<W: Write>(
    item: &DisplayItem,
    json_mode: bool,
    writer: &mut W,
) -> Result<(), CliError> {
    let exchange = item.exchange_label();

    if json_mode {
        let line = BalanceJson {
            address: &item.address,
            balance: item.balance.to_string(),
            exchange,
            currency: item.exchange_value().map(|(c, _)| c.code()),
        };
        serde_json::to_writer(&mut *writer, &line)?;
    } else {
        write!(writer, "{}\t{}\t{}", item.address, item.balance, exchange)?;
    }

    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Human-readable form of a bootstrap outcome.
pub fn describe_outcome(outcome: &BootstrapOutcome) -> String {
    match outcome {
        BootstrapOutcome::Continue(m) => format!("continue\t{m}"),
        BootstrapOutcome::ContinueWithWalletSetup(m) => format!("wallet-setup-required\t{m}"),
        BootstrapOutcome::ContinueUnauthenticated(m) => format!("anonymous\t{m}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mozo::{ExchangeRateInfo, Module};
    use rust_decimal_macros::dec;

    fn item() -> DisplayItem {
        DisplayItem {
            balance: dec!(12.5),
            address: "0xabc".into(),
            exchange_rate: Some(ExchangeRateInfo {
                currency: Some("KRW".into()),
                rate: Some(dec!(1000)),
            }),
        }
    }

    #[test]
    fn test_write_balance_tsv() {
        let mut out = Vec::new();
        write_balance(&item(), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0xabc\t12.5\t₩12500.0\n");
    }

    #[test]
    fn test_write_balance_json() {
        let mut out = Vec::new();
        write_balance(&item(), true, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["address"], "0xabc");
        assert_eq!(v["balance"], "12.5");
        assert_eq!(v["exchange"], "₩12500.0");
        assert_eq!(v["currency"], "KRW");
    }

    #[test]
    fn test_write_empty_item() {
        let mut out = Vec::new();
        write_balance(&DisplayItem::empty(), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\t0\t0.0\n");
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(
            describe_outcome(&BootstrapOutcome::ContinueWithWalletSetup(Module::Wallet)),
            "wallet-setup-required\twallet"
        );
    }
}
