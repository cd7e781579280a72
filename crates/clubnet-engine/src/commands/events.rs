//! Event and attendance commands

use chrono::NaiveDate;
use clubnet_core::errors::Result;
use clubnet_core::model::{Attendance, AttendanceStatus, ClubId, Event, EventId, NewEvent};
use clubnet_core::Session;
use clubnet_store::Repository;

use super::{not_found, require_self, run_logged};

/// Schedule an event hosted by the logged-in user
///
/// ## Errors
///
/// - `Forbidden`: `event.host_id` is not the session's user
/// - `NotFound`: the club does not exist
/// - `InvalidInput`: empty title or out-of-range coordinates
pub fn create_event(repo: &Repository, session: &Session, event: &NewEvent) -> Result<EventId> {
    run_logged("create_event", Some(session.user_id()), || {
        require_self(session, event.host_id, "event")?;
        if repo.get_club(event.club_id)?.is_none() {
            return Err(not_found("club", event.club_id));
        }
        repo.create_event(event)
    })
}

/// ## Errors
///
/// - `NotFound`: no event with this id
pub fn show_event(repo: &Repository, id: EventId) -> Result<Event> {
    run_logged("show_event", None, || {
        repo.get_event(id)?.ok_or_else(|| not_found("event", id))
    })
}

pub fn club_events(repo: &Repository, club_id: ClubId) -> Result<Vec<Event>> {
    run_logged("club_events", None, || {
        if repo.get_club(club_id)?.is_none() {
            return Err(not_found("club", club_id));
        }
        repo.list_events_by_club(club_id)
    })
}

/// Upcoming events counted from `from`, or from today
pub fn upcoming_events(repo: &Repository, from: Option<NaiveDate>) -> Result<Vec<Event>> {
    run_logged("upcoming_events", None, || match from {
        Some(date) => repo.upcoming_events_from(date),
        None => repo.upcoming_events(),
    })
}

/// Events the logged-in user has joined, is interested in or completed
pub fn my_events(repo: &Repository, session: &Session) -> Result<Vec<Event>> {
    run_logged("my_events", Some(session.user_id()), || {
        repo.events_attended_by(session.user_id())
    })
}

/// Set the logged-in user's attendance status, replacing any earlier one
///
/// ## Errors
///
/// - `NotFound`: no event with this id
pub fn join_event(
    repo: &Repository,
    session: &Session,
    event_id: EventId,
    status: AttendanceStatus,
) -> Result<Attendance> {
    run_logged("join_event", Some(session.user_id()), || {
        if repo.get_event(event_id)?.is_none() {
            return Err(not_found("event", event_id));
        }
        repo.join_event(event_id, session.user_id(), status)?;
        repo.attendance(event_id, session.user_id())?
            .ok_or_else(|| not_found("attendance", event_id))
    })
}

/// Whether the user was attending; leaving twice is not an error
pub fn leave_event(repo: &Repository, session: &Session, event_id: EventId) -> Result<bool> {
    run_logged("leave_event", Some(session.user_id()), || {
        repo.leave_event(event_id, session.user_id())
    })
}

pub fn event_attendance(repo: &Repository, event_id: EventId) -> Result<Vec<Attendance>> {
    run_logged("event_attendance", None, || repo.list_attendance(event_id))
}

/// Cancel an event the logged-in user hosts
///
/// ## Errors
///
/// - `NotFound`: no event with this id
/// - `Forbidden`: another user hosts it
pub fn cancel_event(repo: &Repository, session: &Session, event_id: EventId) -> Result<()> {
    run_logged("cancel_event", Some(session.user_id()), || {
        let event = repo
            .get_event(event_id)?
            .ok_or_else(|| not_found("event", event_id))?;
        require_self(session, event.host_id, "event")?;
        repo.delete_event(event_id)?;
        Ok(())
    })
}
