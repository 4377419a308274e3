//! Typed client for the movie API endpoints.
//!
//! This module provides the [`MovieApiClient`] type. Every call goes through
//! the shared [`HttpClient`], so requests carry whatever bearer token the
//! [`AuthSessionManager`](crate::auth::AuthSessionManager) last attached.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::accounts::{Credentials, RegisterResponse, Registration};
use crate::api::errors::ApiError;
use crate::api::movies::{Movie, MovieInput};
use crate::api::reviews::{Review, ReviewInput};
use crate::auth::TokenPair;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Client for the movie, review and account endpoints.
///
/// # Thread Safety
///
/// `MovieApiClient` is `Send + Sync` and cheap to clone; clones share the
/// underlying [`HttpClient`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use movie_api::api::{Credentials, MovieApiClient};
/// use movie_api::auth::{AuthSessionManager, FileStore};
/// use movie_api::clients::HttpClient;
/// use movie_api::MovieApiConfig;
///
/// let http_client = Arc::new(HttpClient::new(&MovieApiConfig::default()));
/// let api = MovieApiClient::new(Arc::clone(&http_client));
/// let mut session = AuthSessionManager::new(FileStore::new("session.json"), http_client);
/// session.initialize();
///
/// let tokens = api.obtain_token(&Credentials::new("bob", "hunter2")?).await?;
/// session.login(tokens)?;
///
/// for movie in api.list_movies().await? {
///     println!("{} ({})", movie.title, movie.release_date);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct MovieApiClient {
    http_client: Arc<HttpClient>,
}

// Verify MovieApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MovieApiClient>();
};

impl MovieApiClient {
    /// Creates a client over a shared HTTP client.
    #[must_use]
    pub const fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &Arc<HttpClient> {
        &self.http_client
    }

    /// Exchanges credentials for a token pair (`POST token/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with code 401 for unknown credentials.
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.send_json(HttpMethod::Post, "token/", credentials)
            .await?
            .json()
            .map_err(ApiError::from)
    }

    /// Creates an account (`POST register/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for mismatched passwords or a taken
    /// username or email.
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegisterResponse, ApiError> {
        self.send_json(HttpMethod::Post, "register/", registration)
            .await?
            .json()
            .map_err(ApiError::from)
    }

    /// Lists all movies (`GET movies/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a movie list.
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.get("movies/").await
    }

    /// Fetches one movie with its reviews (`GET movies/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns an error where [`ApiError::is_not_found`] holds for unknown ids.
    pub async fn get_movie(&self, id: u64) -> Result<Movie, ApiError> {
        self.get(&format!("movies/{id}/")).await
    }

    /// Adds a movie owned by the current user (`POST movies/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for rejected fields.
    pub async fn create_movie(&self, input: &MovieInput) -> Result<Movie, ApiError> {
        self.send_json(HttpMethod::Post, "movies/", input)
            .await?
            .json()
            .map_err(ApiError::from)
    }

    /// Replaces a movie's fields (`PUT movies/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns an error where [`ApiError::is_permission_denied`] holds if the
    /// current user does not own the movie.
    pub async fn update_movie(&self, id: u64, input: &MovieInput) -> Result<Movie, ApiError> {
        self.send_json(HttpMethod::Put, &format!("movies/{id}/"), input)
            .await?
            .json()
            .map_err(ApiError::from)
    }

    /// Deletes a movie (`DELETE movies/{id}/`).
    ///
    /// # Errors
    ///
    /// Returns an error where [`ApiError::is_permission_denied`] holds if the
    /// current user does not own the movie.
    pub async fn delete_movie(&self, id: u64) -> Result<(), ApiError> {
        let request = HttpRequest::builder(HttpMethod::Delete, format!("movies/{id}/")).build()?;
        self.http_client.request(request).await?;
        Ok(())
    }

    /// Lists a movie's reviews, newest first (`GET movies/{id}/reviews/`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a review list.
    pub async fn list_reviews(&self, movie_id: u64) -> Result<Vec<Review>, ApiError> {
        self.get(&format!("movies/{movie_id}/reviews/")).await
    }

    /// Posts a review (`POST movies/{id}/reviews/`).
    ///
    /// The input is checked locally first; an invalid one is never sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] for a local check failure, or
    /// [`ApiError::Validation`] when the API refuses a second review by the
    /// same user.
    pub async fn create_review(
        &self,
        movie_id: u64,
        input: &ReviewInput,
    ) -> Result<Review, ApiError> {
        input.validate().map_err(ApiError::InvalidInput)?;

        self.send_json(HttpMethod::Post, &format!("movies/{movie_id}/reviews/"), input)
            .await?
            .json()
            .map_err(ApiError::from)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        let response = self.http_client.request(request).await?;
        Ok(response.json()?)
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest::builder(method, path)
            .body(serde_json::to_value(body)?)
            .body_type(DataType::Json)
            .build()?;

        Ok(self.http_client.request(request).await?)
    }
}
