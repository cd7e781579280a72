//! Media commands

use clubnet_core::errors::Result;
use clubnet_core::model::{EventId, Media, MediaId, MediaType, NewMedia};
use clubnet_core::Session;
use clubnet_store::Repository;

use super::{not_found, require_self, run_logged};

/// Store a media reference captured by the logged-in user
///
/// ## Errors
///
/// - `Forbidden`: `media.user_id` is not the session's user
/// - `NotFound`: the referenced event does not exist
pub fn save_media(repo: &Repository, session: &Session, media: &NewMedia) -> Result<MediaId> {
    run_logged("save_media", Some(session.user_id()), || {
        require_self(session, media.user_id, "media")?;
        if let Some(event_id) = media.event_id {
            if repo.get_event(event_id)?.is_none() {
                return Err(not_found("event", event_id));
            }
        }
        repo.save_media(media)
    })
}

pub fn event_media(repo: &Repository, event_id: EventId) -> Result<Vec<Media>> {
    run_logged("event_media", None, || repo.media_for_event(event_id))
}

pub fn my_media(repo: &Repository, session: &Session) -> Result<Vec<Media>> {
    run_logged("my_media", Some(session.user_id()), || {
        repo.media_for_user(session.user_id())
    })
}

pub fn media_by_type(repo: &Repository, media_type: MediaType) -> Result<Vec<Media>> {
    run_logged("media_by_type", None, || repo.media_by_type(media_type))
}

/// ## Errors
///
/// - `NotFound`: no media with this id
/// - `Forbidden`: another user captured it
pub fn delete_media(repo: &Repository, session: &Session, id: MediaId) -> Result<()> {
    run_logged("delete_media", Some(session.user_id()), || {
        let media = repo.get_media(id)?.ok_or_else(|| not_found("media", id))?;
        require_self(session, media.user_id, "media")?;
        repo.delete_media(id)?;
        Ok(())
    })
}
