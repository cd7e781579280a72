use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ClubId, UserId};

pub type ReviewId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub club_id: ClubId,
    pub user_id: UserId,
    pub rating: i64,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Review input. The rating is not range-checked here: storage rejects it
/// and the caller sees a constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub club_id: ClubId,
    pub user_id: UserId,
    pub rating: i64,
    pub text: Option<String>,
    pub media_url: Option<String>,
}

impl NewReview {
    pub fn new(club_id: ClubId, user_id: UserId, rating: i64) -> Self {
        Self {
            club_id,
            user_id,
            rating,
            text: None,
            media_url: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }
}

/// A review joined with its author's display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub author_name: String,
    pub author_image: Option<String>,
}
