use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ModelError};
use crate::geo::validate_coordinates;
use crate::model::UserId;

pub type ClubId = i64;

/// A club with its review aggregates
///
/// `member_count` is the number of distinct reviewers and `rating` the mean
/// review rating; both are 0 for a club without reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub description: Option<String>,
    pub sport_type: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` once the owning user has been deleted
    pub owner_id: Option<UserId>,
    pub member_count: i64,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClub {
    pub name: String,
    pub description: Option<String>,
    pub sport_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: UserId,
}

impl NewClub {
    pub fn new(
        name: impl Into<String>,
        sport_type: impl Into<String>,
        latitude: f64,
        longitude: f64,
        owner_id: UserId,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            sport_type: sport_type.into(),
            latitude,
            longitude,
            owner_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_text("name", &self.name)?;
        validate_coordinates(self.latitude, self.longitude)
    }
}
