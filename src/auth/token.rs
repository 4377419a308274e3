//! Access token decoding.
//!
//! Access tokens are JWTs issued by the API. The client has no signing
//! secret, so the payload is decoded without signature verification and
//! only the claims the session needs are read: `exp`, `user_id` and
//! `username`.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::auth::AuthUser;

/// A token pair issued by `POST /token/` or `POST /register/`.
///
/// `Debug` output masks both tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The short-lived access token.
    pub access: String,
    /// The refresh token. Stored alongside the access token, never used to refresh.
    pub refresh: String,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenPair { access: *****, refresh: ***** }")
    }
}

/// Reasons an access token does not yield a session user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    /// The token could not be decoded into the expected claims.
    #[error("Malformed access token: {reason}")]
    Malformed {
        /// Why decoding failed.
        reason: String,
    },

    /// The token decoded, but its `exp` claim is not in the future.
    #[error("Access token expired at {exp}")]
    Expired {
        /// The expiry timestamp, in seconds since the epoch.
        exp: f64,
    },
}

/// The claims read from an access token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiration timestamp (seconds since the epoch). Any JSON number is
    /// accepted, fractional seconds included.
    pub exp: f64,

    /// The user's id. Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: u64,

    /// The user's name. Empty when the claim is absent.
    #[serde(default)]
    pub username: String,
}

impl TokenClaims {
    /// Decodes the payload of an access token without verifying its signature.
    ///
    /// Expiry is not checked here; see [`is_expired_at`](Self::is_expired_at).
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] if the token is not a JWT or lacks
    /// the `exp` or `user_id` claims.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        // `exp` presence is enforced by the claims struct itself.
        validation.required_spec_claims = HashSet::new();

        let key = DecodingKey::from_secret(&[]);
        decode::<Self>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Malformed {
                reason: e.to_string(),
            })
    }

    /// Returns `true` unless `exp` lies strictly after `now`.
    ///
    /// The comparison is made at millisecond precision, so a token whose
    /// `exp` equals the current whole second is already expired once any
    /// fraction of that second has passed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp * 1000.0 <= now.timestamp_millis() as f64
    }

    /// Returns the session user described by these claims.
    #[must_use]
    pub fn user(&self) -> AuthUser {
        AuthUser {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

/// Decodes `token` and returns its user if the token has not expired at `now`.
///
/// # Errors
///
/// Returns [`TokenError::Malformed`] if decoding fails, or
/// [`TokenError::Expired`] if the token has expired.
pub fn session_user(token: &str, now: DateTime<Utc>) -> Result<AuthUser, TokenError> {
    let claims = TokenClaims::decode(token)?;
    if claims.is_expired_at(now) {
        return Err(TokenError::Expired { exp: claims.exp });
    }
    Ok(claims.user())
}

fn deserialize_user_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUserId {
        Number(u64),
        Text(String),
    }

    match RawUserId::deserialize(deserializer)? {
        RawUserId::Number(id) => Ok(id),
        RawUserId::Text(text) => text.trim().parse().map_err(de::Error::custom),
    }
}
