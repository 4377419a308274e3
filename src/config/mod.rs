//! Configuration types for the movie API client.
//!
//! # Overview
//!
//! - [`MovieApiConfig`]: The configuration struct holding all client settings
//! - [`MovieApiConfigBuilder`]: A builder for constructing [`MovieApiConfig`] instances
//! - [`BaseUrl`]: A validated API base address
//! - [`Password`]: A credential newtype with masked debug output
//!
//! # Example
//!
//! ```rust
//! use movie_api::{BaseUrl, MovieApiConfig};
//!
//! let config = MovieApiConfig::builder()
//!     .base_url(BaseUrl::new("https://movies.example.com/api").unwrap())
//!     .user_agent_prefix("MovieShelf/1.0")
//!     .build();
//!
//! assert_eq!(config.base_url().as_ref(), "https://movies.example.com/api");
//! ```

mod newtypes;

pub use newtypes::{BaseUrl, Password};

/// The API address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the movie API client.
///
/// The base address is fixed for the lifetime of the client built from it.
///
/// # Thread Safety
///
/// `MovieApiConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieApiConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
}

impl MovieApiConfig {
    /// Creates a new builder for constructing a `MovieApiConfig`.
    #[must_use]
    pub fn builder() -> MovieApiConfigBuilder {
        MovieApiConfigBuilder::new()
    }

    /// Returns the API base address.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for MovieApiConfig {
    fn default() -> Self {
        MovieApiConfigBuilder::new().build()
    }
}

// Verify MovieApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MovieApiConfig>();
};

/// Builder for constructing [`MovieApiConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct MovieApiConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
}

impl MovieApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base address.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`MovieApiConfig`].
    #[must_use]
    pub fn build(self) -> MovieApiConfig {
        let base_url = self.base_url.unwrap_or_else(default_base_url);

        MovieApiConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}

fn default_base_url() -> BaseUrl {
    match BaseUrl::new(DEFAULT_BASE_URL) {
        Ok(url) => url,
        Err(e) => unreachable!("default base URL is valid: {e}"),
    }
}
