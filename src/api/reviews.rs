//! Review resources and the review form's checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::FieldErrors;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Shortest accepted comment, counted in characters after trimming.
pub const MIN_COMMENT_CHARS: usize = 5;

/// Message for a rating outside `MIN_RATING..=MAX_RATING`.
pub const RATING_OUT_OF_RANGE: &str = "Please select a rating between 1 and 5.";

/// Message for a comment shorter than [`MIN_COMMENT_CHARS`].
pub const COMMENT_TOO_SHORT: &str = "Comment must be at least 5 characters long.";

/// A review as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review id.
    pub id: u64,
    /// Username of the author.
    pub user: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Comment text.
    pub comment: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
    /// Id of the reviewed movie.
    #[serde(default)]
    pub movie: Option<u64>,
}

/// A review about to be submitted.
///
/// # Example
///
/// ```rust
/// use movie_api::api::ReviewInput;
///
/// let input = ReviewInput::new(4, "  Gripping from start to finish.  ");
/// assert_eq!(input.comment, "Gripping from start to finish.");
/// assert!(input.validate().is_ok());
///
/// let errors = ReviewInput::new(0, "ok").validate().unwrap_err();
/// assert!(errors.field("rating").is_some());
/// assert!(errors.field("comment").is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInput {
    /// Rating from 1 to 5.
    pub rating: u8,
    /// Comment text, trimmed.
    pub comment: String,
}

impl ReviewInput {
    /// Creates an input with the comment trimmed. Nothing is checked yet.
    #[must_use]
    pub fn new(rating: u8, comment: impl AsRef<str>) -> Self {
        Self {
            rating,
            comment: comment.as_ref().trim().to_string(),
        }
    }

    /// Builds an input from raw form values. A rating that is not a number
    /// is treated as unselected and fails [`validate`](Self::validate).
    #[must_use]
    pub fn parse(rating: &str, comment: &str) -> Self {
        Self::new(rating.trim().parse().unwrap_or(0), comment)
    }

    /// Checks the rating range and the comment length.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] keyed by `rating` and `comment`.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.insert("rating", RATING_OUT_OF_RANGE);
        }
        if self.comment.trim().chars().count() < MIN_COMMENT_CHARS {
            errors.insert("comment", COMMENT_TOO_SHORT);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(ReviewInput::new(1, "Great film").validate().is_ok());
        assert!(ReviewInput::new(5, "Great film").validate().is_ok());

        for rating in [0, 6, 10] {
            let errors = ReviewInput::new(rating, "Great film").validate().unwrap_err();
            assert_eq!(errors.joined("rating").unwrap(), RATING_OUT_OF_RANGE);
            assert!(errors.field("comment").is_none());
        }
    }

    #[test]
    fn test_comment_length_counts_trimmed_chars() {
        assert!(ReviewInput::new(3, "   abcd   ").validate().is_err());
        assert!(ReviewInput::new(3, "abcde").validate().is_ok());
        assert!(ReviewInput::new(3, "ñandú").validate().is_ok());

        let errors = ReviewInput::new(3, "").validate().unwrap_err();
        assert_eq!(errors.joined("comment").unwrap(), COMMENT_TOO_SHORT);
    }

    #[test]
    fn test_parse_form_values() {
        assert_eq!(ReviewInput::parse(" 4 ", "Nice one"), ReviewInput::new(4, "Nice one"));
        assert_eq!(ReviewInput::parse("", "Nice one").rating, 0);
        assert!(ReviewInput::parse("five", "Nice one").validate().is_err());
    }

    #[test]
    fn test_review_deserializes() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "id": 2,
            "user": "dave",
            "rating": 3,
            "comment": "Fine.",
            "created_at": "2024-05-02T08:30:00.123456Z"
        }))
        .unwrap();

        assert_eq!(review.user, "dave");
        assert_eq!(review.movie, None);
    }
}
