//! HTTP client types for movie API communication.
//!
//! This module provides the HTTP client adapter through which every API call
//! travels.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client with bearer token injection
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//!
//! # Authorization
//!
//! While a bearer token is set on the client, every request carries
//! `Authorization: Bearer <token>`. Without one, requests go out with no
//! `Authorization` header at all. The token is normally managed by
//! [`AuthSessionManager`](crate::auth::AuthSessionManager).
//!
//! # Retry Behavior
//!
//! There is none. Non-2xx responses are returned to the caller as
//! [`HttpError::Response`] on the first attempt.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, AUTHORIZATION_HEADER, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RAW_BODY_KEY};
