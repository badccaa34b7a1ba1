//! Decoding of backend JSON fixtures, including sparse payloads.

use mozo::types::*;
use rust_decimal_macros::dec;

#[test]
fn test_profile_without_wallet() {
    let json = r#"{ "userId": "b2c1", "status": "PENDING" }"#;

    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.user_id, "b2c1");
    assert!(profile.wallet_info.is_none());

    let user = User::from_profile(profile);
    assert!(!user.wallet_ready());
    assert!(user.offchain_address().is_none());
}

#[test]
fn test_profile_with_wallet_missing_seed() {
    let json = r#"{
        "userId": "b2c1",
        "walletInfo": { "offchainAddress": "0x9f8e7d6c5b4a39281706f5e4d3c2b1a098765432" }
    }"#;

    let user = User::from_profile(serde_json::from_str(json).unwrap());
    assert!(!user.wallet_ready());
    assert_eq!(
        user.offchain_address(),
        Some("0x9f8e7d6c5b4a39281706f5e4d3c2b1a098765432")
    );
}

#[test]
fn test_cached_user_round_trip() {
    let json = r#"{
        "id": "b2c1",
        "profile": {
            "userId": "b2c1",
            "walletInfo": {
                "encryptSeedPhrase": "U2FsdGVkX19x",
                "offchainAddress": "0xabc"
            }
        }
    }"#;

    let user: User = serde_json::from_str(json).unwrap();
    assert!(user.wallet_ready());

    let again: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
    assert_eq!(again, user);
}

#[test]
fn test_token_info_defaults() {
    let info: TokenInfo = serde_json::from_str(r#"{ "balance": "42" }"#).unwrap();
    assert_eq!(info.decimals, 0);
    assert!(info.address.is_none());
    assert_eq!(info.display_balance().unwrap(), dec!(42));
}

#[test]
fn test_exchange_rate_sparse() {
    let info: ExchangeRateInfo = serde_json::from_str("{}").unwrap();
    assert!(info.usable().is_none());

    let info: ExchangeRateInfo =
        serde_json::from_str(r#"{ "currency": "krw", "rate": 1187.25 }"#).unwrap();
    assert_eq!(info.usable(), Some((CurrencyType::Krw, dec!(1187.25))));
}

#[test]
fn test_address_book_list() {
    let json = r#"[
        { "id": 1, "name": "Alice", "soloAddress": "0xa11ce" },
        { "name": "Bob", "soloAddress": "0xb0b" }
    ]"#;

    let contacts: Vec<Contact> = serde_json::from_str(json).unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id, Some(1));
    assert!(contacts[1].id.is_none());
    assert_eq!(contacts[1].solo_address, "0xb0b");
}
