//! Authentication session handling for the movie API client.
//!
//! # Overview
//!
//! - [`AuthSessionManager`]: Owns the session; `initialize`, `login`, `logout`, `query`
//! - [`Session`] / [`AuthState`]: The session and its read-only view
//! - [`SessionStore`]: Durable token storage, with [`MemoryStore`] and [`FileStore`]
//! - [`TokenPair`] / [`TokenClaims`]: Issued tokens and the claims read from them
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use movie_api::auth::{AuthSessionManager, MemoryStore, TokenPair};
//! use movie_api::clients::HttpClient;
//! use movie_api::MovieApiConfig;
//!
//! let http_client = Arc::new(HttpClient::new(&MovieApiConfig::default()));
//! let mut manager = AuthSessionManager::new(MemoryStore::new(), Arc::clone(&http_client));
//! manager.initialize();
//!
//! // Tokens that do not decode leave the session anonymous but stored.
//! manager.login(TokenPair::new("opaque", "refresh")).unwrap();
//! assert!(!manager.query().is_authenticated);
//! assert_eq!(http_client.bearer_token().as_deref(), Some("opaque"));
//!
//! manager.logout().unwrap();
//! assert!(http_client.bearer_token().is_none());
//! ```

mod manager;
pub mod session;
mod store;
mod token;

pub use manager::AuthSessionManager;
pub use session::{AuthState, AuthUser, Session};
pub use store::{
    FileStore, MemoryStore, SessionError, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY,
};
pub use token::{session_user, TokenClaims, TokenError, TokenPair};
