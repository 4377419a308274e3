//! Error types for the movie API client.
//!
//! This module contains the configuration error type. Errors for the HTTP
//! layer live in [`crate::clients`], errors for API calls in [`crate::api`]
//! and errors for session persistence in [`crate::auth`].
//!
//! # Example
//!
//! ```rust
//! use movie_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL cannot be empty.
    #[error("API base URL cannot be empty. Please provide the address of the movie API (e.g., 'http://localhost:8000/api').")]
    EmptyBaseUrl,

    /// Base URL is invalid.
    #[error("Invalid API base URL '{url}'. Please provide a URL with an http or https scheme and a host.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Password cannot be empty.
    #[error("Password cannot be empty.")]
    EmptyPassword,
}
