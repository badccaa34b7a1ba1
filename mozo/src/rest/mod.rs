pub mod endpoints;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::MozoConfig;
use crate::error::{MozoError, Result};
use crate::store::TokenStore;

/// HTTP client wrapper for the Mozo REST API.
///
/// The access token is read from the token store on every request, so a
/// token saved after authentication is picked up without rebuilding the
/// client.
#[derive(Clone)]
pub struct MozoHttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl MozoHttpClient {
    /// # Errors
    ///
    /// Returns `MozoError::IncorrectUrl` for a malformed base URL.
    pub fn new(config: &MozoConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(MozoError::Network)?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .authorize(self.client.get(&url))
            .query(query)
            .send()
            .await?;

        let resp = Self::check_status(resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(MozoError::Json)
    }

    /// POST a JSON body, ignoring any response body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;

        Self::check_status(resp).await?;
        Ok(())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check_status(resp: Response) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(MozoError::from_status(status, body))
    }
}

impl std::fmt::Debug for MozoHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MozoHttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
