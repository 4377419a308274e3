//! Movie resources.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::reviews::Review;
use crate::auth::{AuthState, AuthUser};

/// A movie as returned by `movies/` and `movies/{id}/`.
///
/// Detail responses nest the movie's reviews, newest first, and the
/// average rating rounded to one decimal. Both are empty when no review
/// exists yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie id.
    pub id: u64,
    /// Title, at least 2 characters.
    pub title: String,
    /// Director.
    pub director: String,
    /// Release date.
    pub release_date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Poster URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Id of the user who added the movie.
    pub created_by: u64,
    /// Username of the user who added the movie.
    #[serde(default)]
    pub created_by_username: String,
    /// When the movie was added.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the movie was last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Reviews, newest first.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Mean rating, absent without reviews.
    #[serde(default)]
    pub average_rating: Option<f64>,
}

impl Movie {
    /// Returns `true` if `user` added this movie and may edit or delete it.
    #[must_use]
    pub fn is_owned_by(&self, user: Option<&AuthUser>) -> bool {
        user.is_some_and(|user| user.id == self.created_by)
    }

    /// Returns `true` if one of the nested reviews was written by `username`.
    #[must_use]
    pub fn has_review_by(&self, username: &str) -> bool {
        self.reviews.iter().any(|review| review.user == username)
    }

    /// Returns `true` if the session may write a review for this movie:
    /// it is authenticated and has not reviewed the movie yet.
    #[must_use]
    pub fn can_review(&self, state: &AuthState) -> bool {
        match &state.user {
            Some(user) if state.is_authenticated => !self.has_review_by(&user.username),
            _ => false,
        }
    }
}

/// The writable fields of a movie, sent on create and update.
///
/// The API assigns `created_by` from the bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInput {
    /// Title, at least 2 characters.
    pub title: String,
    /// Director.
    pub director: String,
    /// Release date, sent as `YYYY-MM-DD`.
    pub release_date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Poster URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MovieInput {
    /// Prefills an edit form from an existing movie.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            release_date: movie.release_date,
            description: movie.description.clone(),
            image_url: movie.image_url.clone(),
        }
    }
}

impl From<&Movie> for MovieInput {
    fn from(movie: &Movie) -> Self {
        Self::from_movie(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie_json() -> serde_json::Value {
        json!({
            "id": 4,
            "title": "Heat",
            "director": "Michael Mann",
            "release_date": "1995-12-15",
            "description": "A crew of thieves and a detective.",
            "image_url": null,
            "created_by": 7,
            "created_by_username": "bob",
            "reviews": [
                {
                    "id": 1,
                    "user": "carol",
                    "rating": 5,
                    "comment": "Still the best shootout.",
                    "created_at": "2024-03-01T10:00:00Z",
                    "movie": 4
                }
            ],
            "average_rating": 5.0
        })
    }

    fn state_for(id: u64, username: &str) -> AuthState {
        AuthState {
            is_authenticated: true,
            user: Some(AuthUser {
                id,
                username: username.to_string(),
            }),
            loading: false,
        }
    }

    #[test]
    fn test_movie_deserializes_detail_response() {
        let movie: Movie = serde_json::from_value(movie_json()).unwrap();

        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1995, 12, 15).unwrap());
        assert_eq!(movie.reviews.len(), 1);
        assert_eq!(movie.average_rating, Some(5.0));
        assert!(movie.created_at.is_none());
    }

    #[test]
    fn test_movie_without_reviews() {
        let mut body = movie_json();
        body.as_object_mut().unwrap().remove("reviews");
        body["average_rating"] = serde_json::Value::Null;

        let movie: Movie = serde_json::from_value(body).unwrap();
        assert!(movie.reviews.is_empty());
        assert!(movie.average_rating.is_none());
    }

    #[test]
    fn test_ownership() {
        let movie: Movie = serde_json::from_value(movie_json()).unwrap();

        assert!(movie.is_owned_by(state_for(7, "bob").user.as_ref()));
        assert!(!movie.is_owned_by(state_for(8, "carol").user.as_ref()));
        assert!(!movie.is_owned_by(None));
    }

    #[test]
    fn test_can_review() {
        let movie: Movie = serde_json::from_value(movie_json()).unwrap();

        assert!(movie.can_review(&state_for(7, "bob")));
        assert!(!movie.can_review(&state_for(8, "carol")));
        assert!(!movie.can_review(&AuthState::default()));
    }

    #[test]
    fn test_input_from_movie_omits_missing_image() {
        let movie: Movie = serde_json::from_value(movie_json()).unwrap();
        let input = MovieInput::from(&movie);

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "title": "Heat",
                "director": "Michael Mann",
                "release_date": "1995-12-15",
                "description": "A crew of thieves and a detective."
            })
        );
    }
}
