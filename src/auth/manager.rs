//! The auth session manager.
//!
//! [`AuthSessionManager`] is the single owner of the [`Session`]. It hydrates
//! the session from a [`SessionStore`] at startup, applies `login` and
//! `logout`, keeps the shared [`HttpClient`]'s bearer token in step, and
//! publishes an [`AuthState`] after every transition.
//!
//! # Lifecycle
//!
//! ```text
//!   new()  ──►  loading: true, anonymous
//!     │
//!     ▼
//!   initialize()  ──►  loading: false, user from stored token (or anonymous)
//!     │
//!     ├─ login(pair)  ──►  tokens stored, user from pair.access
//!     └─ logout()     ──►  tokens removed, anonymous
//! ```
//!
//! Malformed or expired tokens never surface as errors; they resolve to an
//! anonymous session. Only store I/O failures are returned.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::auth::store::{SessionError, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::auth::token::{session_user, TokenPair};
use crate::auth::{AuthState, AuthUser, Session};
use crate::clients::HttpClient;

/// Owns the client's authentication session.
///
/// Commands take `&mut self`, so only one transition can run at a time.
/// Other components observe the session through [`query`](Self::query) or
/// [`subscribe`](Self::subscribe).
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use movie_api::auth::{AuthSessionManager, MemoryStore};
/// use movie_api::clients::HttpClient;
/// use movie_api::MovieApiConfig;
///
/// let http_client = Arc::new(HttpClient::new(&MovieApiConfig::default()));
/// let mut manager = AuthSessionManager::new(MemoryStore::new(), http_client);
///
/// assert!(manager.query().loading);
/// manager.initialize();
///
/// let state = manager.query();
/// assert!(!state.loading);
/// assert!(!state.is_authenticated);
/// ```
#[derive(Debug)]
pub struct AuthSessionManager {
    store: Box<dyn SessionStore>,
    http_client: Arc<HttpClient>,
    session: Session,
    state_tx: watch::Sender<AuthState>,
}

impl AuthSessionManager {
    /// Creates a manager for a freshly loaded application.
    ///
    /// The session starts anonymous with `loading` set; nothing is read from
    /// the store until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(store: impl SessionStore + 'static, http_client: Arc<HttpClient>) -> Self {
        let session = Session::new();
        let (state_tx, _) = watch::channel(session.state());

        Self {
            store: Box::new(store),
            http_client,
            session,
            state_tx,
        }
    }

    /// Hydrates the session from the store.
    ///
    /// If an access token is stored, it is decoded and checked for expiry.
    /// A valid token populates the user and is attached to the HTTP client;
    /// an invalid or expired one triggers a logout. Either way `loading`
    /// ends up `false`. This never fails: read and clear errors are logged
    /// and treated as "no token".
    pub fn initialize(&mut self) {
        let stored = self.store.get(ACCESS_TOKEN_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read stored access token");
            None
        });

        if let Some(access_token) = stored {
            match session_user(&access_token, Utc::now()) {
                Ok(user) => {
                    let refresh_token = self.store.get(REFRESH_TOKEN_KEY).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "Could not read stored refresh token");
                        None
                    });
                    tracing::debug!(user_id = user.id, "Restored session from stored token");

                    self.http_client.set_bearer_token(access_token.as_str());
                    self.session.access_token = Some(access_token);
                    self.session.refresh_token = refresh_token;
                    self.session.user = Some(user);
                }
                Err(e) => {
                    tracing::debug!(reason = %e, "Discarding stored access token");
                    if let Err(e) = self.clear() {
                        tracing::warn!(error = %e, "Could not remove stored tokens");
                    }
                }
            }
        }

        self.session.initializing = false;
        self.publish();
    }

    /// Starts a session from a freshly issued token pair.
    ///
    /// Both tokens are persisted and the access token is attached to the
    /// HTTP client. The user is decoded from the access token; if that
    /// fails, the user stays empty while the tokens remain stored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the tokens cannot be persisted. The
    /// in-memory session is left unchanged in that case.
    pub fn login(&mut self, pair: TokenPair) -> Result<(), SessionError> {
        self.store.store_tokens(&pair)?;

        let user = match session_user(&pair.access, Utc::now()) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(reason = %e, "Issued access token did not yield a user");
                None
            }
        };

        self.http_client.set_bearer_token(pair.access.as_str());
        self.session.access_token = Some(pair.access);
        self.session.refresh_token = Some(pair.refresh);
        self.session.user = user;

        tracing::debug!(
            authenticated = self.session.is_authenticated(),
            "Logged in"
        );
        self.publish();
        Ok(())
    }

    /// Ends the session. Calling it while logged out changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the stored tokens cannot be removed. The
    /// in-memory session and the HTTP client are cleared regardless.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let result = self.clear();
        tracing::debug!("Logged out");
        self.publish();
        result
    }

    /// Returns the current view of the session.
    #[must_use]
    pub fn query(&self) -> AuthState {
        self.session.state()
    }

    /// Returns a receiver that observes every change of [`AuthState`].
    ///
    /// The receiver starts with the current state marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    /// Returns the current user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&AuthUser> {
        self.session.user.as_ref()
    }

    /// Returns the in-memory access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    /// Returns the in-memory refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token.as_deref()
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Returns the HTTP client whose bearer token this manager maintains.
    #[must_use]
    pub const fn http_client(&self) -> &Arc<HttpClient> {
        &self.http_client
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        let result = self.store.clear_tokens();
        self.session.clear();
        self.http_client.clear_bearer_token();
        result
    }

    fn publish(&self) {
        let state = self.session.state();
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;
    use crate::config::MovieApiConfig;
    use chrono::Duration;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;

    fn token(exp_offset: Duration, user_id: u64, username: &str) -> String {
        let claims = json!({
            "exp": (Utc::now() + exp_offset).timestamp(),
            "user_id": user_id,
            "username": username,
        });
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap()
    }

    fn manager_with(store: Arc<MemoryStore>) -> AuthSessionManager {
        let http_client = Arc::new(HttpClient::new(&MovieApiConfig::default()));
        AuthSessionManager::new(store, http_client)
    }

    #[test]
    fn test_initialize_without_token_finishes_loading() {
        let mut manager = manager_with(Arc::new(MemoryStore::new()));
        assert!(manager.query().loading);

        manager.initialize();

        assert_eq!(
            manager.query(),
            AuthState {
                is_authenticated: false,
                user: None,
                loading: false,
            }
        );
    }

    #[test]
    fn test_initialize_restores_valid_token() {
        let store = Arc::new(MemoryStore::new());
        let access = token(Duration::hours(1), 7, "bob");
        store
            .store_tokens(&TokenPair::new(access.clone(), "r1"))
            .unwrap();

        let mut manager = manager_with(Arc::clone(&store));
        manager.initialize();

        let state = manager.query();
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().id, 7);
        assert_eq!(manager.access_token(), Some(access.as_str()));
        assert_eq!(manager.refresh_token(), Some("r1"));
        assert_eq!(manager.http_client().bearer_token(), Some(access));
    }

    #[test]
    fn test_initialize_clears_expired_token() {
        let store = Arc::new(MemoryStore::new());
        store
            .store_tokens(&TokenPair::new(token(Duration::seconds(-10), 5, "a"), "r"))
            .unwrap();

        let mut manager = manager_with(Arc::clone(&store));
        manager.initialize();

        assert!(!manager.query().is_authenticated);
        assert!(!manager.query().loading);
        assert!(store.is_empty());
        assert!(manager.http_client().bearer_token().is_none());
    }

    #[test]
    fn test_initialize_clears_malformed_token() {
        let store = Arc::new(MemoryStore::new());
        store.store_tokens(&TokenPair::new("garbage", "r")).unwrap();

        let mut manager = manager_with(Arc::clone(&store));
        manager.initialize();

        assert!(!manager.query().is_authenticated);
        assert!(store.is_empty());
    }

    #[test]
    fn test_login_with_undecodable_token_keeps_tokens_stored() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = manager_with(Arc::clone(&store));
        manager.initialize();

        manager.login(TokenPair::new("opaque", "r1")).unwrap();

        assert!(!manager.query().is_authenticated);
        assert_eq!(
            store.get(ACCESS_TOKEN_KEY).unwrap(),
            Some("opaque".to_string())
        );
        assert_eq!(manager.http_client().bearer_token(), Some("opaque".to_string()));
    }

    #[test]
    fn test_loading_never_returns_after_initialize() {
        let mut manager = manager_with(Arc::new(MemoryStore::new()));
        manager.initialize();
        manager
            .login(TokenPair::new(token(Duration::hours(1), 1, "a"), "r"))
            .unwrap();
        manager.logout().unwrap();
        manager.initialize();

        assert!(!manager.query().loading);
    }

    #[test]
    fn test_subscribe_sees_transitions() {
        let mut manager = manager_with(Arc::new(MemoryStore::new()));
        let mut rx = manager.subscribe();
        assert!(rx.borrow().loading);

        manager.initialize();
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().loading);

        manager
            .login(TokenPair::new(token(Duration::hours(1), 7, "bob"), "r"))
            .unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated);

        manager.logout().unwrap();
        assert!(!rx.borrow_and_update().is_authenticated);

        // A second logout changes nothing and notifies no one.
        manager.logout().unwrap();
        assert!(!rx.has_changed().unwrap());
    }
}
