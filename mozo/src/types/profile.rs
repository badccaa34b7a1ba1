use serde::{Deserialize, Serialize};

/// Profile returned by `GET /user-profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub wallet_info: Option<WalletInfo>,
}

/// Wallet attached to a profile.
///
/// The seed phrase is only ever present in encrypted form; its absence means
/// the wallet has not been set up on this account yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    #[serde(default)]
    pub encrypt_seed_phrase: Option<String>,
    #[serde(default)]
    pub offchain_address: Option<String>,
}

impl WalletInfo {
    pub fn has_seed_phrase(&self) -> bool {
        self.encrypt_seed_phrase.is_some()
    }
}

/// The authenticated user cached in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl User {
    pub fn from_profile(profile: UserProfile) -> Self {
        Self {
            id: profile.user_id.clone(),
            profile: Some(profile),
        }
    }

    pub fn wallet_info(&self) -> Option<&WalletInfo> {
        self.profile.as_ref()?.wallet_info.as_ref()
    }

    /// A wallet exists and its encrypted seed phrase is present.
    ///
    /// A profile without this is not enough to proceed: wallet setup is
    /// still required.
    pub fn wallet_ready(&self) -> bool {
        self.wallet_info().is_some_and(WalletInfo::has_seed_phrase)
    }

    pub fn offchain_address(&self) -> Option<&str> {
        self.wallet_info()?.offchain_address.as_deref()
    }
}
