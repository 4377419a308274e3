//! Movie API operations and resource types.
//!
//! # Overview
//!
//! - [`MovieApiClient`]: Account, movie and review calls over the shared
//!   [`HttpClient`](crate::clients::HttpClient)
//! - [`Movie`] / [`Review`]: Resources as the API returns them
//! - [`MovieInput`] / [`ReviewInput`] / [`Credentials`] / [`Registration`]: Request payloads
//! - [`ApiError`] / [`FieldErrors`]: Failures classified for display
//!
//! Request payloads that have local checks ([`Credentials`], [`ReviewInput`])
//! report them as [`FieldErrors`], the same shape the API uses for its own
//! validation failures.

mod accounts;
mod client;
mod errors;
mod movies;
mod reviews;

pub use accounts::{Credentials, RegisterResponse, Registration, UserProfile, CREDENTIALS_REQUIRED};
pub use client::MovieApiClient;
pub use errors::{ApiError, FieldErrors, DETAIL, FALLBACK_ERROR_MESSAGE, NON_FIELD_ERRORS};
pub use movies::{Movie, MovieInput};
pub use reviews::{
    Review, ReviewInput, COMMENT_TOO_SHORT, MAX_RATING, MIN_COMMENT_CHARS, MIN_RATING,
    RATING_OUT_OF_RANGE,
};
