use std::time::Duration;

use url::Url;

use crate::error::{MozoError, Result};
use crate::types::CurrencyType;

/// Default per-request timeout for the REST client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Mozo client.
#[derive(Debug, Clone)]
pub struct MozoConfig {
    /// Base URL for the Mozo backend (e.g. `https://backend.example.com/api`).
    pub api_base_url: String,
    /// Currency used for exchange rate lookups.
    pub currency: CurrencyType,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
}

impl MozoConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            currency: CurrencyType::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::IncorrectUrl` if the URL does not parse or is not
    /// an `http`/`https` URL.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|e| MozoError::IncorrectUrl(format!("{}: {e}", self.api_base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(MozoError::IncorrectUrl(format!(
                "{}: unsupported scheme {other}",
                self.api_base_url
            ))),
        }
    }
}
