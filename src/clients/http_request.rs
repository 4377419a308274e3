//! Requests as the movie API client sends them.
//!
//! An [`HttpRequest`] names one endpoint relative to the configured base URL
//! (`token/`, `movies/3/reviews/`, ...). Endpoints that create or replace a
//! resource take a JSON body; reads and `DELETE movies/{id}/` take none.
//! [`HttpRequestBuilder::build`] enforces that before anything goes out.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// The verbs the movie API routes on.
///
/// `Get` reads movies and reviews, `Post` logs in, registers and creates,
/// `Put` edits a movie and `Delete` removes one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a movie, the movie list or a review list.
    Get,
    /// Obtain a token, register, add a movie or post a review.
    Post,
    /// Replace a movie's fields.
    Put,
    /// Remove a movie.
    Delete,
}

impl HttpMethod {
    /// Lowercase verb, as it appears in logs and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Whether every endpoint using this verb expects a payload.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of a request payload. The API only accepts JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// `application/json`.
    Json,
}

impl DataType {
    /// Value for the `Content-Type` header.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// One call to a movie API endpoint.
///
/// The bearer token is not part of the request; [`HttpClient`] adds it from
/// the current session when sending.
///
/// [`HttpClient`]: crate::clients::HttpClient
///
/// # Example
///
/// ```rust
/// use movie_api::clients::{DataType, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let movies = HttpRequest::builder(HttpMethod::Get, "movies/")
///     .build()
///     .unwrap();
/// assert!(movies.body.is_none());
///
/// let review = HttpRequest::builder(HttpMethod::Post, "movies/3/reviews/")
///     .body(json!({"rating": 4, "comment": "Great pacing."}))
///     .body_type(DataType::Json)
///     .build()
///     .unwrap();
/// assert_eq!(review.path, "movies/3/reviews/");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Verb.
    pub http_method: HttpMethod,
    /// Endpoint path, joined onto the base URL (`movies/3/`).
    pub path: String,
    /// JSON payload for `token/`, `register/`, movie and review writes.
    pub body: Option<serde_json::Value>,
    /// Encoding of `body`; required whenever `body` is set.
    pub body_type: Option<DataType>,
    /// Query string pairs.
    pub query: Option<HashMap<String, String>>,
    /// Headers sent on top of the client's defaults and the bearer token.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Starts a request for `path` with the given verb.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Checks the payload matches the verb.
    ///
    /// [`HttpClient::request`](crate::clients::HttpClient::request) runs this
    /// again, so a request edited after building is still checked.
    ///
    /// # Errors
    ///
    /// - [`InvalidHttpRequestError::MissingBodyType`] if a body has no encoding
    /// - [`InvalidHttpRequestError::MissingBody`] for a `POST` or `PUT` without
    ///   a body, e.g. a login with no credentials attached
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }
        Ok(())
    }
}

/// Fluent construction of an [`HttpRequest`], checked by [`build`](Self::build).
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                http_method: method,
                path: path.into(),
                body: None,
                body_type: None,
                query: None,
                extra_headers: None,
            },
        }
    }

    /// Attaches a payload. Pair it with [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Declares the payload encoding.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.request.body_type = Some(body_type);
        self
    }

    /// Adds a query string pair; a repeated key keeps the last value.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a header that overrides the client's default of the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] when [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "movies/")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "movies/");
        assert!(request.body.is_none());
        assert!(request.body_type.is_none());
    }

    #[test]
    fn test_builder_creates_valid_put_request() {
        let request = HttpRequest::builder(HttpMethod::Put, "movies/3/")
            .body(json!({"title": "Alien"}))
            .body_type(DataType::Json)
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(request.body_type, Some(DataType::Json));
    }

    #[test]
    fn test_only_writes_require_a_body() {
        assert!(HttpMethod::Post.requires_body());
        assert!(HttpMethod::Put.requires_body());
        assert!(!HttpMethod::Get.requires_body());
        assert!(!HttpMethod::Delete.requires_body());
    }

    #[test]
    fn test_verify_rechecks_edited_request() {
        let mut request = HttpRequest::builder(HttpMethod::Put, "movies/3/")
            .body(json!({"title": "Alien"}))
            .body_type(DataType::Json)
            .build()
            .unwrap();
        request.body = None;

        assert!(matches!(
            request.verify(),
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "put"
        ));
    }

    #[test]
    fn test_repeated_query_param_keeps_last_value() {
        let request = HttpRequest::builder(HttpMethod::Get, "movies/")
            .query_param("page", "1")
            .query_param("page", "2")
            .build()
            .unwrap();

        assert_eq!(request.query.unwrap().get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_verify_requires_body_for_post() {
        let result = HttpRequest::builder(HttpMethod::Post, "token/").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));
    }

    #[test]
    fn test_verify_requires_body_type_when_body_present() {
        let result = HttpRequest::builder(HttpMethod::Delete, "movies/3/")
            .body(json!({}))
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBodyType)
        ));
    }

    #[test]
    fn test_delete_without_body_is_valid() {
        assert!(HttpRequest::builder(HttpMethod::Delete, "movies/3/")
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_with_query_and_headers() {
        let request = HttpRequest::builder(HttpMethod::Get, "movies/")
            .query_param("search", "alien")
            .header("X-Request-Source", "tests")
            .build()
            .unwrap();

        assert_eq!(
            request.query.unwrap().get("search"),
            Some(&"alien".to_string())
        );
        assert_eq!(
            request.extra_headers.unwrap().get("X-Request-Source"),
            Some(&"tests".to_string())
        );
    }
}
