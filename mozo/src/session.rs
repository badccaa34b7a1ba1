//! Session context passed explicitly to every interactor operation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::error::Result;
use crate::store::{MemoryStore, SessionStore, TokenStore};
use crate::types::{Contact, ExchangeRateInfo, User};

/// Token and user storage plus the caches filled by background downloads.
///
/// Each cache is its own slot, so the concurrent downloads never write the
/// same value. Share it as `Arc<SessionContext>` when downloads are spawned.
///
/// [`SessionContext::clear`] bumps a generation counter. Downloads capture the
/// generation when they start and their results are dropped if it moved, so
/// a logout is never undone by a request that was still in flight.
pub struct SessionContext {
    tokens: Arc<dyn TokenStore>,
    sessions: Arc<dyn SessionStore>,
    generation: AtomicU64,
    exchange_rate: watch::Sender<Option<ExchangeRateInfo>>,
    address_book: watch::Sender<Option<Vec<Contact>>>,
    anonymous_address: watch::Sender<Option<String>>,
}

impl SessionContext {
    pub fn new(tokens: Arc<dyn TokenStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            tokens,
            sessions,
            generation: AtomicU64::new(0),
            exchange_rate: watch::channel(None).0,
            address_book: watch::channel(None).0,
            anonymous_address: watch::channel(None).0,
        }
    }

    /// Context backed by a fresh [`MemoryStore`] for both tokens and sessions.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }

    // --- Token ---

    pub fn access_token(&self) -> Option<String> {
        self.tokens.access_token()
    }

    pub fn save_token(&self, token: Option<String>) -> Result<()> {
        self.tokens.save_token(token)
    }

    // --- Current user ---

    pub fn current_user(&self) -> Option<User> {
        self.sessions.load_current_user()
    }

    pub fn save_current_user(&self, user: User) -> Result<()> {
        self.sessions.save_current_user(user)
    }

    /// No token, or a token whose profile was never loaded.
    pub fn is_anonymous(&self) -> bool {
        self.access_token().is_none() || self.current_user().is_none()
    }

    // --- Caches ---

    /// Number of times the session has been cleared.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Store `rate` unless the session was cleared after `generation`.
    /// Returns whether it was stored.
    pub fn store_exchange_rate(&self, generation: u64, rate: ExchangeRateInfo) -> bool {
        self.exchange_rate.send_if_modified(|slot| {
            if self.generation() != generation {
                return false;
            }
            *slot = Some(rate);
            true
        })
    }

    /// Store `contacts` unless the session was cleared after `generation`.
    /// Returns whether they were stored.
    pub fn store_address_book(&self, generation: u64, contacts: Vec<Contact>) -> bool {
        self.address_book.send_if_modified(|slot| {
            if self.generation() != generation {
                return false;
            }
            *slot = Some(contacts);
            true
        })
    }

    pub fn exchange_rate(&self) -> Option<ExchangeRateInfo> {
        self.exchange_rate.borrow().clone()
    }

    pub fn set_exchange_rate(&self, rate: Option<ExchangeRateInfo>) {
        self.exchange_rate.send_replace(rate);
    }

    /// Watch the exchange rate slot, e.g. to refresh a label once the
    /// background download lands.
    pub fn subscribe_exchange_rate(&self) -> watch::Receiver<Option<ExchangeRateInfo>> {
        self.exchange_rate.subscribe()
    }

    pub fn address_book(&self) -> Option<Vec<Contact>> {
        self.address_book.borrow().clone()
    }

    pub fn set_address_book(&self, contacts: Option<Vec<Contact>>) {
        self.address_book.send_replace(contacts);
    }

    // --- Anonymous wallet ---

    /// Address of a wallet created before the user signed in.
    pub fn anonymous_address(&self) -> Option<String> {
        self.anonymous_address.borrow().clone()
    }

    pub fn set_anonymous_address(&self, address: Option<String>) {
        self.anonymous_address.send_replace(address);
    }

    /// Drop everything tied to the signed-in user.
    pub fn clear(&self) -> Result<()> {
        // Bump first: a store racing with this either lands before the slot
        // is reset below or sees the new generation and backs off.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tokens.save_token(None)?;
        self.sessions.clear_current_user()?;
        self.set_exchange_rate(None);
        self.set_address_book(None);
        self.set_anonymous_address(None);
        info!("session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.access_token().is_some())
            .field("has_user", &self.current_user().is_some())
            .field("generation", &self.generation())
            .field("has_exchange_rate", &self.exchange_rate.borrow().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserProfile;
    use rust_decimal_macros::dec;

    fn user() -> User {
        User::from_profile(UserProfile {
            user_id: "u-1".into(),
            status: None,
            wallet_info: None,
        })
    }

    #[test]
    fn test_is_anonymous() {
        let ctx = SessionContext::in_memory();
        assert!(ctx.is_anonymous());

        ctx.save_token(Some("tok".into())).unwrap();
        assert!(ctx.is_anonymous(), "token without user is still anonymous");

        ctx.save_current_user(user()).unwrap();
        assert!(!ctx.is_anonymous());
    }

    #[test]
    fn test_clear_drops_user_state() {
        let ctx = SessionContext::in_memory();
        ctx.save_token(Some("tok".into())).unwrap();
        ctx.save_current_user(user()).unwrap();
        ctx.set_exchange_rate(Some(ExchangeRateInfo {
            currency: Some("KRW".into()),
            rate: Some(dec!(1100)),
        }));
        ctx.set_address_book(Some(vec![]));
        ctx.set_anonymous_address(Some("0xanon".into()));

        ctx.clear().unwrap();

        assert!(ctx.access_token().is_none());
        assert!(ctx.current_user().is_none());
        assert!(ctx.exchange_rate().is_none());
        assert!(ctx.address_book().is_none());
        assert!(ctx.anonymous_address().is_none());
    }

    #[test]
    fn test_store_after_clear_is_dropped() {
        let ctx = SessionContext::in_memory();
        let generation = ctx.generation();

        assert!(ctx.store_address_book(generation, vec![]));
        assert!(ctx.address_book().is_some());

        ctx.clear().unwrap();
        assert_eq!(ctx.generation(), generation + 1);

        let rate = ExchangeRateInfo {
            currency: Some("KRW".into()),
            rate: Some(dec!(1100)),
        };
        assert!(!ctx.store_address_book(generation, vec![]));
        assert!(!ctx.store_exchange_rate(generation, rate.clone()));
        assert!(ctx.address_book().is_none());
        assert!(ctx.exchange_rate().is_none());

        assert!(ctx.store_exchange_rate(ctx.generation(), rate.clone()));
        assert_eq!(ctx.exchange_rate(), Some(rate));
    }

    #[test]
    fn test_exchange_rate_subscription_sees_update() {
        let ctx = SessionContext::in_memory();
        let mut rx = ctx.subscribe_exchange_rate();
        assert!(rx.borrow_and_update().is_none());

        ctx.set_exchange_rate(Some(ExchangeRateInfo {
            currency: Some("USD".into()),
            rate: Some(dec!(0.00075)),
        }));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().and_then(|r| r.rate), Some(dec!(0.00075)));
    }
}
