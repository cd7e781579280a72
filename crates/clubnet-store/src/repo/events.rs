use chrono::NaiveDate;
use clubnet_core::model::event::{format_date, format_time};
use clubnet_core::model::{
    Attendance, AttendanceStatus, ClubId, Event, EventId, NewEvent, UserId,
};
use rusqlite::OptionalExtension;

use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::{map_event_row, parse_column, EventQuery, UPCOMING_LIMIT};

fn map_attendance_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Attendance> {
    let status: String = row.get(2)?;
    Ok(Attendance {
        event_id: row.get(0)?,
        user_id: row.get(1)?,
        status: parse_column(2, &status, |s| s.parse::<AttendanceStatus>())?,
    })
}

impl Repository {
    pub fn create_event(&self, event: &NewEvent) -> Result<EventId> {
        event.validate()?;
        let conn = self.conn("create_event")?;
        conn.execute(
            "INSERT INTO Events (club_id, host_id, title, description, date, time,
                                 location_lat, location_long, max_participants)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                event.club_id,
                event.host_id,
                event.title,
                event.description,
                format_date(event.date),
                format_time(event.time),
                event.latitude,
                event.longitude,
                event.max_participants
            ],
        )
        .map_err(sql_error("create_event"))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(event_id = id, club_id = event.club_id, "event created");
        Ok(id)
    }

    pub fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        let query = EventQuery::by_id(id);
        self.conn("get_event")?
            .query_row(
                &query.sql(),
                rusqlite::params_from_iter(query.params()),
                map_event_row,
            )
            .optional()
            .map_err(sql_error("get_event"))
    }

    pub fn list_events_by_club(&self, club_id: ClubId) -> Result<Vec<Event>> {
        self.query_events("list_events_by_club", &EventQuery::all().for_club(club_id))
    }

    /// The next events dated today or later, soonest first
    pub fn upcoming_events(&self) -> Result<Vec<Event>> {
        self.upcoming_events_from(chrono::Local::now().date_naive())
    }

    /// The next events dated on or after `date`, at most `UPCOMING_LIMIT`
    pub fn upcoming_events_from(&self, date: NaiveDate) -> Result<Vec<Event>> {
        self.query_events(
            "upcoming_events",
            &EventQuery::all().from_date(date).limit(UPCOMING_LIMIT),
        )
    }

    pub fn events_attended_by(&self, user_id: UserId) -> Result<Vec<Event>> {
        self.query_events("events_attended_by", &EventQuery::all().attended_by(user_id))
    }

    /// Record the user's status for an event, replacing any earlier one
    pub fn join_event(
        &self,
        event_id: EventId,
        user_id: UserId,
        status: AttendanceStatus,
    ) -> Result<()> {
        self.conn("join_event")?
            .execute(
                "INSERT OR REPLACE INTO Event_Attendance (event_id, user_id, status)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![event_id, user_id, status.as_str()],
            )
            .map_err(sql_error("join_event"))?;
        tracing::debug!(event_id, user_id, status = %status, "attendance recorded");
        Ok(())
    }

    /// Whether an attendance row was removed
    pub fn leave_event(&self, event_id: EventId, user_id: UserId) -> Result<bool> {
        let removed = self
            .conn("leave_event")?
            .execute(
                "DELETE FROM Event_Attendance WHERE event_id = ?1 AND user_id = ?2",
                [event_id, user_id],
            )
            .map_err(sql_error("leave_event"))?;
        Ok(removed > 0)
    }

    pub fn attendance(&self, event_id: EventId, user_id: UserId) -> Result<Option<Attendance>> {
        self.conn("attendance")?
            .query_row(
                "SELECT event_id, user_id, status FROM Event_Attendance
                 WHERE event_id = ?1 AND user_id = ?2",
                [event_id, user_id],
                map_attendance_row,
            )
            .optional()
            .map_err(sql_error("attendance"))
    }

    pub fn list_attendance(&self, event_id: EventId) -> Result<Vec<Attendance>> {
        let conn = self.conn("list_attendance")?;
        let mut stmt = conn
            .prepare(
                "SELECT event_id, user_id, status FROM Event_Attendance
                 WHERE event_id = ?1 ORDER BY user_id",
            )
            .map_err(sql_error("list_attendance"))?;
        let rows = stmt
            .query_map([event_id], map_attendance_row)
            .map_err(sql_error("list_attendance"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error("list_attendance"))?;
        Ok(rows)
    }

    pub fn delete_event(&self, id: EventId) -> Result<bool> {
        let deleted = self
            .conn("delete_event")?
            .execute("DELETE FROM Events WHERE event_id = ?1", [id])
            .map_err(sql_error("delete_event"))?;
        tracing::debug!(event_id = id, deleted, "event deleted");
        Ok(deleted > 0)
    }

    fn query_events(&self, op: &'static str, query: &EventQuery) -> Result<Vec<Event>> {
        let conn = self.conn(op)?;
        let mut stmt = conn.prepare(&query.sql()).map_err(sql_error(op))?;
        let events = stmt
            .query_map(rusqlite::params_from_iter(query.params()), map_event_row)
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;
        tracing::debug!(op, rows = events.len(), "event query");
        Ok(events)
    }
}
