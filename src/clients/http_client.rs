//! HTTP client for movie API communication.
//!
//! This module provides the [`HttpClient`] type, the single configured
//! client through which every API call travels. It attaches the bearer
//! token of the current session to each outbound request.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, MovieApiConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// HTTP client for making requests to the movie API.
///
/// The client handles:
/// - URL construction from the fixed base address
/// - Default headers including User-Agent and Accept
/// - `Authorization: Bearer <token>` injection while a token is set
///
/// Responses are passed through as [`HttpResponse`]; non-2xx responses
/// become [`HttpError::Response`] with the body left intact. Nothing is retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. The bearer token sits behind a lock so the
/// session manager can update it while API callers share the same client
/// through an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use movie_api::clients::{HttpClient, HttpMethod, HttpRequest};
/// use movie_api::MovieApiConfig;
///
/// let client = HttpClient::new(&MovieApiConfig::default());
/// client.set_bearer_token("eyJ...");
///
/// let request = HttpRequest::builder(HttpMethod::Get, "movies/")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `http://localhost:8000/api`).
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Access token attached as a bearer credential, if any.
    bearer_token: RwLock<Option<String>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// The client starts without a bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &MovieApiConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Movie API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        tracing::debug!(base_url = %config.base_url(), "Created movie API HTTP client");

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            bearer_token: RwLock::new(None),
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    ///
    /// The `Authorization` header is not part of the defaults; see
    /// [`request_headers`](Self::request_headers).
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sets the access token attached to every subsequent request.
    pub fn set_bearer_token(&self, token: impl Into<String>) {
        let mut slot = self
            .bearer_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.into());
    }

    /// Removes the access token; subsequent requests carry no `Authorization` header.
    pub fn clear_bearer_token(&self) {
        let mut slot = self
            .bearer_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Returns the access token currently attached to requests, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.bearer_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the full header set the given request would be sent with.
    ///
    /// Headers are merged in this order, later entries winning: defaults,
    /// `Authorization` (when a token is set), `Content-Type` (when the
    /// request has a body type), then the request's extra headers.
    #[must_use]
    pub fn request_headers(&self, request: &HttpRequest) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();

        if let Some(token) = self.bearer_token() {
            headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}"));
        }
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        headers
    }

    /// Sends an HTTP request to the movie API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.base_url.join(&request.path);
        let headers = self.request_headers(&request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            authenticated = headers.contains_key(AUTHORIZATION_HEADER),
            "Sending movie API request"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();
        let body = HttpResponse::parse_body(&body_text);

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        tracing::debug!(code, path = %request.path, "Movie API returned an error response");

        Err(HttpError::Response(HttpResponseError {
            code,
            body: response.body,
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{DataType, HttpMethod};
    use serde_json::json;

    fn get_request() -> HttpRequest {
        HttpRequest::builder(HttpMethod::Get, "movies/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let config = MovieApiConfig::builder()
            .base_url(BaseUrl::new("https://movies.example.com/api/").unwrap())
            .build();
        let client = HttpClient::new(&config);

        assert_eq!(client.base_url().as_ref(), "https://movies.example.com/api");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&MovieApiConfig::default());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Movie API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = MovieApiConfig::builder()
            .user_agent_prefix("MovieShelf/1.0")
            .build();
        let client = HttpClient::new(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MovieShelf/1.0 | "));
    }

    #[test]
    fn test_no_authorization_header_without_token() {
        let client = HttpClient::new(&MovieApiConfig::default());

        assert!(client.bearer_token().is_none());
        assert!(!client
            .request_headers(&get_request())
            .contains_key(AUTHORIZATION_HEADER));
    }

    #[test]
    fn test_authorization_header_after_token_set() {
        let client = HttpClient::new(&MovieApiConfig::default());
        client.set_bearer_token("abc.def.ghi");

        assert_eq!(
            client.request_headers(&get_request()).get(AUTHORIZATION_HEADER),
            Some(&"Bearer abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_clear_bearer_token_removes_header() {
        let client = HttpClient::new(&MovieApiConfig::default());
        client.set_bearer_token("abc");
        client.clear_bearer_token();

        assert!(client.bearer_token().is_none());
        assert!(!client
            .request_headers(&get_request())
            .contains_key(AUTHORIZATION_HEADER));
    }

    #[test]
    fn test_content_type_follows_body_type() {
        let client = HttpClient::new(&MovieApiConfig::default());
        let request = HttpRequest::builder(HttpMethod::Post, "movies/")
            .body(json!({"title": "Heat"}))
            .body_type(DataType::Json)
            .build()
            .unwrap();

        assert_eq!(
            client.request_headers(&request).get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(!client
            .request_headers(&get_request())
            .contains_key("Content-Type"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&MovieApiConfig::default());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }
}
