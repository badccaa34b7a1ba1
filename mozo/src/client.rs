use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::api::ApiClient;
use crate::config::MozoConfig;
use crate::error::Result;
use crate::events::{AuthEvent, AuthEvents};
use crate::interactor::{AuthCompletion, BootstrapOutcome, CoreInteractor, Module};
use crate::rest::MozoHttpClient;
use crate::session::SessionContext;
use crate::store::{SessionStore, TokenStore};
use crate::types::DisplayItem;

/// Main Mozo client: one session context plus the interactor that drives it.
#[derive(Debug, Clone)]
pub struct Mozo {
    pub config: MozoConfig,
    context: Arc<SessionContext>,
    interactor: CoreInteractor,
}

impl Mozo {
    /// Create a client talking to the configured backend over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `MozoError::IncorrectUrl` if `config.api_base_url` is invalid.
    pub fn new(
        config: MozoConfig,
        tokens: Arc<dyn TokenStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let http_client = MozoHttpClient::new(&config, Arc::clone(&tokens))?;
        info!(base_url = http_client.base_url(), currency = %config.currency, "mozo client created");
        let context = Arc::new(SessionContext::new(tokens, sessions));
        Ok(Self::with_api(config, context, Arc::new(http_client)))
    }

    /// Create a client over an arbitrary [`ApiClient`].
    pub fn with_api(
        config: MozoConfig,
        context: Arc<SessionContext>,
        api: Arc<dyn ApiClient>,
    ) -> Self {
        let interactor = CoreInteractor::new(api, AuthEvents::new(), config.currency);
        Self {
            config,
            context,
            interactor,
        }
    }

    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    pub fn interactor(&self) -> &CoreInteractor {
        &self.interactor
    }

    /// Subscribe to auth success / logout events.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.interactor.events().subscribe()
    }

    /// See [`CoreInteractor::check_for_authentication`].
    pub async fn check_for_authentication(&self, module: Module) -> Result<BootstrapOutcome> {
        self.interactor
            .check_for_authentication(&self.context, module)
            .await
    }

    /// Handle a new access token and, once the profile is cached, notify
    /// observers of the successful sign-in.
    pub async fn authenticate(&self, access_token: Option<String>) -> Result<AuthCompletion> {
        let completion = self
            .interactor
            .handle_after_auth(&self.context, access_token)
            .await?;
        self.interactor.notify_auth_success();
        Ok(completion)
    }

    /// See [`CoreInteractor::load_balance_info`].
    pub async fn load_balance_info(&self) -> Result<DisplayItem> {
        self.interactor.load_balance_info(&self.context).await
    }

    pub fn is_anonymous(&self) -> bool {
        self.context.is_anonymous()
    }

    pub fn logout(&self) -> Result<()> {
        self.interactor.logout(&self.context)
    }
}
