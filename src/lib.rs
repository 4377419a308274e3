//! # Movie API Rust Client
//!
//! A Rust client for the movie reviews REST API. It bundles the pieces a
//! front end needs around that API: an authentication session persisted
//! across restarts, a route guard, and typed movie, review and account calls.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`MovieApiConfig`] and [`MovieApiConfigBuilder`]
//! - An async HTTP client that attaches the session's bearer token, see [`clients`]
//! - Session management via [`AuthSessionManager`], backed by a
//!   [`SessionStore`](auth::SessionStore)
//! - Route guarding via [`RouteGuard`](routes::RouteGuard)
//! - Movie, review and account operations via [`MovieApiClient`](api::MovieApiClient)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use movie_api::auth::MemoryStore;
//! use movie_api::routes::{GuardDecision, Route, RouteGuard};
//! use movie_api::{AuthSessionManager, BaseUrl, HttpClient, MovieApiConfig};
//!
//! let config = MovieApiConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8000/api").unwrap())
//!     .build();
//!
//! // One HTTP client, shared by the session manager and every API call
//! let http_client = Arc::new(HttpClient::new(&config));
//! let mut session = AuthSessionManager::new(MemoryStore::new(), Arc::clone(&http_client));
//!
//! // Until initialize() runs, protected routes stay pending
//! let home = Route::parse("/");
//! assert_eq!(RouteGuard::resolve(&home, &session.query()), GuardDecision::Pending);
//!
//! session.initialize();
//! assert_eq!(
//!     RouteGuard::resolve(&home, &session.query()),
//!     GuardDecision::Redirect { to: "/login" }
//! );
//! ```
//!
//! ## Logging In
//!
//! ```rust,ignore
//! use movie_api::api::{Credentials, MovieApiClient};
//!
//! let api = MovieApiClient::new(Arc::clone(&http_client));
//!
//! match Credentials::new(username, password) {
//!     Ok(credentials) => {
//!         let tokens = api.obtain_token(&credentials).await?;
//!         session.login(tokens)?;
//!     }
//!     Err(errors) => show_banner(errors.banner_message()),
//! }
//!
//! // Subsequent calls carry `Authorization: Bearer <access>`
//! let movies = api.list_movies().await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration, store and HTTP client are passed explicitly
//! - **Fail-fast validation**: Configuration newtypes validate on construction
//! - **Single writer**: Only the session manager mutates the session
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No retries**: Failures are reported once and left to the caller

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod routes;

// Re-export public types at crate root for convenience
pub use auth::{AuthSessionManager, AuthState, AuthUser, Session, TokenPair};
pub use config::{BaseUrl, MovieApiConfig, MovieApiConfigBuilder, Password};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};

// Re-export API types
pub use api::{ApiError, FieldErrors, MovieApiClient};
