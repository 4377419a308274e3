//! Client routes and the route guard.
//!
//! [`Route`] is the application's route table; [`RouteGuard`] decides,
//! from an [`AuthState`] alone, whether a protected route may render.
//!
//! # Example
//!
//! ```rust
//! use movie_api::routes::{GuardDecision, Route, RouteGuard};
//! use movie_api::AuthState;
//!
//! let route = Route::parse("/movies/3/edit");
//! assert_eq!(route, Route::EditMovie(3));
//!
//! let anonymous = AuthState::default();
//! assert_eq!(
//!     RouteGuard::resolve(&route, &anonymous),
//!     GuardDecision::Redirect { to: "/login" }
//! );
//! ```

use std::fmt;

use crate::auth::AuthState;

/// Where unauthenticated visitors of protected routes are sent.
pub const LOGIN_PATH: &str = "/login";

/// A client-side route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/`, the movie list.
    Home,
    /// `/movies/new`
    NewMovie,
    /// `/movies/{id}`
    MovieDetail(u64),
    /// `/movies/{id}/edit`
    EditMovie(u64),
    /// `/movies/{id}/reviews/new`
    NewReview(u64),
    /// Anything else.
    NotFound,
}

impl Route {
    /// Maps a path to its route. Query strings, fragments and a trailing
    /// slash are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["movies", "new"] => Self::NewMovie,
            ["movies", id] => id.parse().map_or(Self::NotFound, Self::MovieDetail),
            ["movies", id, "edit"] => id.parse().map_or(Self::NotFound, Self::EditMovie),
            ["movies", id, "reviews", "new"] => {
                id.parse().map_or(Self::NotFound, Self::NewReview)
            }
            _ => Self::NotFound,
        }
    }

    /// Returns `true` for routes that require an authenticated session.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::NewMovie
                | Self::MovieDetail(_)
                | Self::EditMovie(_)
                | Self::NewReview(_)
        )
    }

    /// Returns the canonical path, or `None` for [`Route::NotFound`].
    #[must_use]
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Login => Some(LOGIN_PATH.to_string()),
            Self::Register => Some("/register".to_string()),
            Self::Home => Some("/".to_string()),
            Self::NewMovie => Some("/movies/new".to_string()),
            Self::MovieDetail(id) => Some(format!("/movies/{id}")),
            Self::EditMovie(id) => Some(format!("/movies/{id}/edit")),
            Self::NewReview(id) => Some(format!("/movies/{id}/reviews/new")),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => f.write_str(&path),
            None => f.write_str("<not found>"),
        }
    }
}

/// The outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still being checked; show a neutral pending indicator.
    Pending,
    /// Render the requested content.
    Allow,
    /// Navigate to `to`, replacing the current history entry.
    Redirect {
        /// The redirect target.
        to: &'static str,
    },
}

/// Gates protected content on the session state. Holds no state of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Decides whether protected content may render.
    #[must_use]
    pub const fn check(state: &AuthState) -> GuardDecision {
        if state.loading {
            GuardDecision::Pending
        } else if state.is_authenticated {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect { to: LOGIN_PATH }
        }
    }

    /// Applies [`check`](Self::check) to protected routes and allows the rest.
    #[must_use]
    pub const fn resolve(route: &Route, state: &AuthState) -> GuardDecision {
        if route.is_protected() {
            Self::check(state)
        } else {
            GuardDecision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;

    fn state(is_authenticated: bool, loading: bool) -> AuthState {
        AuthState {
            is_authenticated,
            user: is_authenticated.then(|| AuthUser {
                id: 1,
                username: "a".to_string(),
            }),
            loading,
        }
    }

    #[test]
    fn test_guard_pending_while_loading() {
        assert_eq!(RouteGuard::check(&state(false, true)), GuardDecision::Pending);
        assert_eq!(RouteGuard::check(&state(true, true)), GuardDecision::Pending);
    }

    #[test]
    fn test_guard_redirects_anonymous() {
        assert_eq!(
            RouteGuard::check(&state(false, false)),
            GuardDecision::Redirect { to: "/login" }
        );
    }

    #[test]
    fn test_guard_allows_authenticated() {
        assert_eq!(RouteGuard::check(&state(true, false)), GuardDecision::Allow);
    }

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/register/"), Route::Register);
        assert_eq!(Route::parse("/movies/new"), Route::NewMovie);
        assert_eq!(Route::parse("/movies/12"), Route::MovieDetail(12));
        assert_eq!(Route::parse("/movies/12/edit"), Route::EditMovie(12));
        assert_eq!(Route::parse("/movies/12/reviews/new"), Route::NewReview(12));
        assert_eq!(Route::parse("/movies/12?tab=reviews"), Route::MovieDetail(12));
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/movies/abc"), Route::NotFound);
        assert_eq!(Route::parse("/movies/1/delete"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
    }

    #[test]
    fn test_path_matches_parse() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Home,
            Route::NewMovie,
            Route::MovieDetail(4),
            Route::EditMovie(4),
            Route::NewReview(4),
        ] {
            let path = route.path().unwrap();
            assert_eq!(Route::parse(&path), route, "path {path}");
        }
        assert_eq!(Route::NotFound.path(), None);
    }

    #[test]
    fn test_public_routes_bypass_guard() {
        let anonymous = state(false, false);
        assert_eq!(
            RouteGuard::resolve(&Route::Login, &anonymous),
            GuardDecision::Allow
        );
        assert_eq!(
            RouteGuard::resolve(&Route::Register, &state(false, true)),
            GuardDecision::Allow
        );
        assert_eq!(
            RouteGuard::resolve(&Route::NotFound, &anonymous),
            GuardDecision::Allow
        );
        assert_eq!(
            RouteGuard::resolve(&Route::NewMovie, &anonymous),
            GuardDecision::Redirect { to: LOGIN_PATH }
        );
    }
}
