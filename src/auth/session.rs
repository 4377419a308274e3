//! In-memory session state.
//!
//! This module provides the [`Session`] type owned by
//! [`AuthSessionManager`](crate::auth::AuthSessionManager), and the
//! read-only [`AuthState`] view handed to everything else.

use serde::{Deserialize, Serialize};

/// The identity decoded from a valid access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// The user's id (`user_id` claim).
    pub id: u64,
    /// The user's name (`username` claim).
    pub username: String,
}

/// The authentication state of the running client.
///
/// `Session::default()` is the state at application load: no tokens, no user,
/// and `initializing` set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// The bearer credential for API calls, if any.
    pub access_token: Option<String>,

    /// The refresh token stored alongside the access token.
    pub refresh_token: Option<String>,

    /// The user decoded from the access token. Present only when the last
    /// decode succeeded on an unexpired token.
    pub user: Option<AuthUser>,

    /// `true` until the startup check has run.
    pub initializing: bool,
}

impl Session {
    /// Creates the session for a freshly loaded application.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            user: None,
            initializing: true,
        }
    }

    /// Returns `true` if a user is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the read-only view of this session.
    #[must_use]
    pub fn state(&self) -> AuthState {
        AuthState {
            is_authenticated: self.is_authenticated(),
            user: self.user.clone(),
            loading: self.initializing,
        }
    }

    /// Drops tokens and user, leaving `initializing` untouched.
    pub(crate) fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// What route guards and views see of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Whether a user is present.
    pub is_authenticated: bool,
    /// The current user, if any.
    pub user: Option<AuthUser>,
    /// `true` while the startup check is still running.
    pub loading: bool,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
    assert_send_sync::<AuthState>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_initializing_and_anonymous() {
        let session = Session::new();

        assert!(session.initializing);
        assert!(!session.is_authenticated());
        assert_eq!(
            session.state(),
            AuthState {
                is_authenticated: false,
                user: None,
                loading: true,
            }
        );
    }

    #[test]
    fn test_state_reflects_user() {
        let mut session = Session::new();
        session.initializing = false;
        session.user = Some(AuthUser {
            id: 7,
            username: "bob".to_string(),
        });

        let state = session.state();
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.user.unwrap().username, "bob");
    }

    #[test]
    fn test_clear_keeps_initializing_flag() {
        let mut session = Session::new();
        session.initializing = false;
        session.access_token = Some("a".to_string());
        session.refresh_token = Some("r".to_string());
        session.user = Some(AuthUser {
            id: 1,
            username: "a".to_string(),
        });

        session.clear();

        assert_eq!(session.access_token, None);
        assert_eq!(session.refresh_token, None);
        assert_eq!(session.user, None);
        assert!(!session.initializing);
    }
}
