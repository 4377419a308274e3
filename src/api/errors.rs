//! Error types for movie API calls.
//!
//! Failures are sorted into the categories a form or page acts on:
//!
//! - [`ApiError::Validation`]: field-level messages shown next to form fields,
//!   plus any `detail`/`non_field_errors` entries shown as a banner
//! - [`ApiError::Status`]: general failures (permission denied, not found, ...)
//!   shown as a page-level banner
//! - [`ApiError::InvalidInput`]: local checks that failed before anything was
//!   sent, shaped like [`ApiError::Validation`]
//! - [`ApiError::Transport`]: network failures, shown with a fallback message
//!
//! # Example
//!
//! ```rust,ignore
//! match api.create_movie(&input).await {
//!     Ok(movie) => navigate(&format!("/movies/{}", movie.id)),
//!     Err(ApiError::Validation(errors)) => {
//!         title_feedback = errors.joined("title");
//!         banner = errors.banner_message();
//!     }
//!     Err(other) => banner = other.banner_message(),
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::{HttpError, HttpResponseError, InvalidHttpRequestError, RAW_BODY_KEY};

/// The message shown when a failure carries nothing more specific.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Key of general messages in a validation payload.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Key of a single general message in an error payload.
pub const DETAIL: &str = "detail";

/// Validation messages keyed by field name.
///
/// This mirrors the API's validation payload: every field maps to a list of
/// messages. General messages live under [`NON_FIELD_ERRORS`] and [`DETAIL`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty set of errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the messages of `field`.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Appends a general message under [`NON_FIELD_ERRORS`].
    pub fn insert_non_field(&mut self, message: impl Into<String>) {
        self.insert(NON_FIELD_ERRORS, message);
    }

    /// Returns the messages of `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0
            .get(field)
            .map(Vec::as_slice)
            .filter(|messages| !messages.is_empty())
    }

    /// Returns the messages of `field` joined with `", "`.
    #[must_use]
    pub fn joined(&self, field: &str) -> Option<String> {
        self.field(field).map(|messages| messages.join(", "))
    }

    /// Returns the `detail` message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.field(DETAIL)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Returns the general messages.
    #[must_use]
    pub fn non_field_errors(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS).unwrap_or_default()
    }

    /// Drops the messages of `field`, as a form does once the user edits it.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Returns `true` if any field other than the general keys has messages.
    #[must_use]
    pub fn has_field_errors(&self) -> bool {
        self.fields().next().is_some()
    }

    /// Iterates over field-specific entries, skipping the general keys.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .filter(|(name, messages)| {
                name.as_str() != NON_FIELD_ERRORS && name.as_str() != DETAIL && !messages.is_empty()
            })
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    /// Returns `true` if there are no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Returns the banner text: `detail`, else the general messages joined.
    #[must_use]
    pub fn banner_message(&self) -> Option<String> {
        self.detail()
            .map(String::from)
            .or_else(|| self.joined(NON_FIELD_ERRORS))
    }

    /// Reads an API error body.
    ///
    /// Objects become one entry per key; a string value counts as a single
    /// message and any other value is kept as its JSON text. A top-level
    /// array of strings becomes general messages. Other bodies, including
    /// text that was not JSON, yield `None`.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let mut errors = Self::new();
        match body {
            serde_json::Value::Object(map) => {
                for (field, value) in map.iter().filter(|(k, _)| k.as_str() != RAW_BODY_KEY) {
                    for message in messages_of(value) {
                        errors.insert(field.as_str(), message);
                    }
                }
            }
            serde_json::Value::Array(_) => {
                for message in messages_of(body) {
                    errors.insert_non_field(message);
                }
            }
            _ => return None,
        }
        (!errors.is_empty()).then_some(errors)
    }
}

fn messages_of(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(s) => vec![s.clone()],
        serde_json::Value::Array(items) => items.iter().flat_map(messages_of).collect(),
        serde_json::Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Error type for movie API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the input with status 400.
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// The input failed local checks and was never sent.
    #[error("Invalid input: {0:?}")]
    InvalidInput(FieldErrors),

    /// A non-validation failure status.
    #[error("Request failed with status {code}: {message}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The message to show.
        message: String,
    },

    /// The request never got a response.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request was invalid before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl ApiError {
    /// Returns the page-level message for this error, if it has one.
    ///
    /// Validation errors only produce a banner for their general messages;
    /// their field messages belong next to the fields.
    #[must_use]
    pub fn banner_message(&self) -> Option<String> {
        match self {
            Self::Validation(errors) | Self::InvalidInput(errors) => errors.banner_message(),
            Self::Status { message, .. } => Some(message.clone()),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidRequest(_) => {
                Some(FALLBACK_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Returns the field errors of a validation failure, local or remote.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) | Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the HTTP status, when the API answered. Local failures and
    /// transport errors have none.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { code: 401, .. })
    }

    /// Returns `true` for a 403 response.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Status { code: 403, .. })
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404, .. })
    }
}

impl From<HttpResponseError> for ApiError {
    fn from(error: HttpResponseError) -> Self {
        let errors = FieldErrors::from_body(&error.body);

        if error.code == 400 {
            if let Some(errors) = errors {
                return Self::Validation(errors);
            }
        }

        let message = errors
            .and_then(|errors| errors.banner_message())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        Self::Status {
            code: error.code,
            message,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => e.into(),
            HttpError::InvalidRequest(e) => Self::InvalidRequest(e),
            HttpError::Network(e) => Self::Transport(e),
        }
    }
}
