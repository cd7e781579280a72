use clubnet_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ModelError};

pub type UserId = i64;

/// A registered user
///
/// `password_hash` is the hex digest produced by the identity facility; the
/// raw password is never part of any record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<String>,
    pub profile_image_path: Option<String>,
}

/// Registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<Sensitive<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            bio: None,
            location: None,
        }
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        if self.password.is_empty() {
            return Err(ModelError::empty("password"));
        }
        Ok(())
    }
}

/// Partial profile update: `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub preferences: Option<String>,
}

impl UserProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = Some(preferences.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// Supplied fields as (column, value) pairs, in column order
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("bio", &self.bio),
            ("location", &self.location),
            ("preferences", &self.preferences),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match &self.name {
            Some(name) => require_text("name", name),
            None => Ok(()),
        }
    }
}
