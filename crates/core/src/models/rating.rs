//! User rating model

use crate::error::ReadSphereError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest rating a reader can give.
pub const MIN_RATING: f32 = 1.0;
/// Highest rating a reader can give.
pub const MAX_RATING: f32 = 5.0;

/// A single user rating of a book.
///
/// One rating per (user, book) pair is expected; the platform's review
/// service enforces that, not this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: Uuid,
    pub book_id: Uuid,
    /// Star rating, 1.0 to 5.0
    pub rating: f32,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Construct a rating, rejecting values outside the 1-5 star range.
    pub fn new(
        user_id: Uuid,
        book_id: Uuid,
        rating: f32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ReadSphereError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReadSphereError::validation(format!(
                "rating {rating} outside {MIN_RATING}..={MAX_RATING}"
            )));
        }
        Ok(Self {
            user_id,
            book_id,
            rating,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_ratings() {
        let rating = Rating::new(Uuid::new_v4(), Uuid::new_v4(), 4.0, Utc::now());
        assert!(rating.is_ok());
    }

    #[test]
    fn rejects_out_of_range_ratings() {
        assert!(Rating::new(Uuid::new_v4(), Uuid::new_v4(), 0.0, Utc::now()).is_err());
        assert!(Rating::new(Uuid::new_v4(), Uuid::new_v4(), 5.5, Utc::now()).is_err());
    }
}
