//! Account payloads: login credentials and registration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::errors::FieldErrors;
use crate::auth::TokenPair;
use crate::config::Password;

/// The message shown when a login form is submitted incomplete.
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required.";

/// Username and password exchanged for a [`TokenPair`] at `token/`.
///
/// # Example
///
/// ```rust
/// use movie_api::api::Credentials;
///
/// let credentials = Credentials::new("bob", "hunter2").unwrap();
/// assert_eq!(credentials.username(), "bob");
/// assert!(format!("{credentials:?}").contains("*****"));
///
/// let errors = Credentials::new("  ", "hunter2").unwrap_err();
/// assert_eq!(
///     errors.banner_message().as_deref(),
///     Some("Username and password are required.")
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    username: String,
    password: Password,
}

impl Credentials {
    /// Checks both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] with a general message if the trimmed username
    /// or the password is empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, FieldErrors> {
        let username = username.into().trim().to_string();
        let password = Password::new(password).ok().filter(|_| !username.is_empty());

        match password {
            Some(password) => Ok(Self { username, password }),
            None => {
                let mut errors = FieldErrors::new();
                errors.insert_non_field(CREDENTIALS_REQUIRED);
                Err(errors)
            }
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// A new account submitted to `register/`.
///
/// The API checks that `password` and `password2` match and that the
/// username and email are unused; failures come back as field errors.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password2: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"*****")
            .field("password2", &"*****")
            .finish()
    }
}

/// A registered account as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
}

/// The response of `register/`: the new account plus a fresh token pair.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    /// The created account.
    pub user: UserProfile,
    /// Access token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
}

impl RegisterResponse {
    /// Returns the issued tokens, ready for
    /// [`AuthSessionManager::login`](crate::auth::AuthSessionManager::login).
    #[must_use]
    pub fn tokens(&self) -> TokenPair {
        TokenPair::new(self.access.clone(), self.refresh.clone())
    }
}

impl fmt::Debug for RegisterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterResponse")
            .field("user", &self.user)
            .field("access", &"*****")
            .field("refresh", &"*****")
            .finish()
    }
}
