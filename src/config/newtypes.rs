//! Validated newtype wrappers for configuration and credential values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base address for the movie API.
///
/// The URL must carry an `http` or `https` scheme and a non-empty host.
/// A trailing slash is removed so request paths can always be appended
/// with a single `/`.
///
/// # Example
///
/// ```rust
/// use movie_api::BaseUrl;
///
/// let url = BaseUrl::new("http://localhost:8000/api/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8000/api");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it has no http(s) scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a relative request path onto this base URL.
    ///
    /// Leading slashes on `path` are ignored, so `"/movies/"` and `"movies/"`
    /// produce the same URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A user password sent to the login and registration endpoints.
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`, so credentials never end up in logs.
///
/// # Example
///
/// ```rust
/// use movie_api::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// assert_eq!(password.expose(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new non-empty password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Returns the plain-text password.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

impl Serialize for Password {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("http://localhost:8000/api/").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8000/api");
    }

    #[test]
    fn test_base_url_parts() {
        let url = BaseUrl::new("https://movies.example.com:8443/api").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "movies.example.com");

        let url = BaseUrl::new("http://127.0.0.1").unwrap();
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(matches!(BaseUrl::new(""), Err(ConfigError::EmptyBaseUrl)));
        assert!(matches!(BaseUrl::new("   "), Err(ConfigError::EmptyBaseUrl)));

        // No scheme
        assert!(BaseUrl::new("localhost:8000/api").is_err());
        // Unsupported scheme
        assert!(BaseUrl::new("ftp://files.example.com").is_err());
        // Empty host
        assert!(BaseUrl::new("http://").is_err());
        assert!(BaseUrl::new("http:///api").is_err());
    }

    #[test]
    fn test_base_url_join_handles_leading_slash() {
        let url = BaseUrl::new("http://localhost:8000/api").unwrap();
        assert_eq!(url.join("/movies/"), "http://localhost:8000/api/movies/");
        assert_eq!(url.join("movies/3/"), "http://localhost:8000/api/movies/3/");
    }

    #[test]
    fn test_base_url_deserialize_validates() {
        let url: BaseUrl = serde_json::from_str(r#""https://example.com/api/""#).unwrap();
        assert_eq!(url.as_ref(), "https://example.com/api");

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""not a url""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("super-secret").unwrap();
        let debug_output = format!("{:?}", password);
        assert_eq!(debug_output, "Password(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_password_rejects_empty() {
        assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
    }

    #[test]
    fn test_password_serializes_plain_value() {
        let password = Password::new("pw").unwrap();
        assert_eq!(serde_json::to_string(&password).unwrap(), r#""pw""#);
    }
}
