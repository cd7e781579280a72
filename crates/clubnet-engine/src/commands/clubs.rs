//! Club commands

use clubnet_core::errors::{ExError, ExErrorKind, Result};
use clubnet_core::model::{Club, ClubId, NewClub};
use clubnet_core::Session;
use clubnet_store::Repository;

use super::{not_found, require_self, run_logged};

/// Create a club owned by the logged-in user
///
/// ## Errors
///
/// - `Forbidden`: `club.owner_id` is not the session's user
/// - `InvalidInput`: empty name or out-of-range coordinates
pub fn create_club(repo: &Repository, session: &Session, club: &NewClub) -> Result<ClubId> {
    run_logged("create_club", Some(session.user_id()), || {
        require_self(session, club.owner_id, "club")?;
        repo.create_club(club)
    })
}

pub fn list_clubs(repo: &Repository) -> Result<Vec<Club>> {
    run_logged("list_clubs", None, || repo.list_clubs())
}

/// ## Errors
///
/// - `NotFound`: no club with this id
pub fn show_club(repo: &Repository, id: ClubId) -> Result<Club> {
    run_logged("show_club", None, || {
        repo.get_club(id)?.ok_or_else(|| not_found("club", id))
    })
}

pub fn search_clubs(repo: &Repository, text: &str) -> Result<Vec<Club>> {
    run_logged("search_clubs", None, || repo.search_clubs(text))
}

/// ## Errors
///
/// - `InvalidInput`: negative radius or out-of-range centre
pub fn clubs_near(
    repo: &Repository,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<Vec<Club>> {
    run_logged("clubs_near", None, || {
        repo.clubs_near(latitude, longitude, radius_km)
    })
}

pub fn clubs_by_sport(repo: &Repository, sport_type: &str) -> Result<Vec<Club>> {
    run_logged("clubs_by_sport", None, || repo.clubs_by_sport(sport_type))
}

/// Delete a club the logged-in user owns
///
/// ## Errors
///
/// - `NotFound`: no club with this id
/// - `Forbidden`: the club has another owner, or none
pub fn delete_club(repo: &Repository, session: &Session, id: ClubId) -> Result<()> {
    run_logged("delete_club", Some(session.user_id()), || {
        let club = repo.get_club(id)?.ok_or_else(|| not_found("club", id))?;
        match club.owner_id {
            Some(owner) => require_self(session, owner, "club")?,
            None => {
                return Err(ExError::new(ExErrorKind::Forbidden)
                    .with_entity_id(id)
                    .with_message("club has no owner"))
            }
        }
        repo.delete_club(id)?;
        Ok(())
    })
}
