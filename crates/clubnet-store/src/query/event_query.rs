use chrono::NaiveDate;
use clubnet_core::model::event::{format_date, parse_date, parse_time};
use clubnet_core::model::{ClubId, Event, EventId, UserId};
use rusqlite::types::Value;

use super::{parse_column, Filters};

/// Row cap for the upcoming-events feed
pub const UPCOMING_LIMIT: u32 = 20;

const EVENT_SELECT: &str = "SELECT e.event_id, e.club_id, e.host_id, e.title, e.description,
       e.date, e.time, e.location_lat, e.location_long, e.max_participants,
       COUNT(ea.user_id) AS participant_count
FROM Events e
LEFT JOIN Event_Attendance ea ON ea.event_id = e.event_id";

/// Events with their attendance count, ordered by (date, time)
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    filters: Filters,
    limit: Option<u32>,
}

impl EventQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: EventId) -> Self {
        let mut query = Self::all();
        query.filters.push("e.event_id = ?", [Value::Integer(id)]);
        query
    }

    pub fn for_club(mut self, club_id: ClubId) -> Self {
        self.filters.push("e.club_id = ?", [Value::Integer(club_id)]);
        self
    }

    /// Events dated on or after `date`
    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.filters
            .push("e.date >= ?", [Value::Text(format_date(date))]);
        self
    }

    /// Events the user has an attendance row for. The count still covers
    /// every attendee, not just this user.
    pub fn attended_by(mut self, user_id: UserId) -> Self {
        self.filters.push(
            "e.event_id IN (SELECT event_id FROM Event_Attendance WHERE user_id = ?)",
            [Value::Integer(user_id)],
        );
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sql(&self) -> String {
        let mut sql = format!(
            "{}\n{}\nGROUP BY e.event_id\nORDER BY e.date, e.time, e.event_id",
            EVENT_SELECT,
            self.filters.where_clause()
        );
        if let Some(limit) = self.limit {
            sql.push_str(&format!("\nLIMIT {}", limit));
        }
        sql
    }

    pub fn params(&self) -> &[Value] {
        self.filters.params()
    }
}

/// Map one row of an `EventQuery`
pub fn map_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    let date: String = row.get(5)?;
    let time: String = row.get(6)?;
    Ok(Event {
        id: row.get(0)?,
        club_id: row.get(1)?,
        host_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        date: parse_column(5, &date, parse_date)?,
        time: parse_column(6, &time, parse_time)?,
        latitude: row.get(7)?,
        longitude: row.get(8)?,
        max_participants: row.get(9)?,
        current_participants: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upcoming_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let query = EventQuery::all().from_date(date).limit(UPCOMING_LIMIT);
        let sql = query.sql();
        assert!(sql.contains("WHERE e.date >= ?"));
        assert!(sql.contains("ORDER BY e.date, e.time"));
        assert!(sql.ends_with("LIMIT 20"));
        assert_eq!(query.params(), &[Value::Text("2026-10-19".into())]);
    }

    #[test]
    fn test_no_limit_by_default() {
        assert!(!EventQuery::all().for_club(3).sql().contains("LIMIT"));
    }
}
