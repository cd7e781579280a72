use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ModelError};
use crate::model::{text_enum, EventId, UserId};

pub type MediaId = i64;

text_enum! {
    MediaType, "media type" {
        Photo => "photo",
        Video => "video",
        Audio => "audio",
    }
}

/// A stored reference to captured media. The file itself lives outside the
/// data layer; `url` is whatever path the capture collaborator handed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub user_id: UserId,
    /// `None` for profile or unassociated media
    pub event_id: Option<EventId>,
    pub media_type: MediaType,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub user_id: UserId,
    pub event_id: Option<EventId>,
    pub media_type: MediaType,
    pub url: String,
}

impl NewMedia {
    pub fn new(user_id: UserId, media_type: MediaType, url: impl Into<String>) -> Self {
        Self {
            user_id,
            event_id: None,
            media_type,
            url: url.into(),
        }
    }

    pub fn for_event(mut self, event_id: EventId) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        require_text("url", &self.url)
    }
}
