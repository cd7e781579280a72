use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ModelError};
use crate::geo::validate_coordinates;
use crate::model::{text_enum, ClubId, UserId};

pub type EventId = i64;

/// Storage format for event dates; sorts chronologically as text
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Storage format for event start times
pub const TIME_FORMAT: &str = "%H:%M";

/// An event with its attendance count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub club_id: ClubId,
    pub host_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub max_participants: i64,
    /// Attendance rows of any status
    pub current_participants: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub club_id: ClubId,
    pub host_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub max_participants: i64,
}

impl NewEvent {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text("title", &self.title)?;
        validate_coordinates(self.latitude, self.longitude)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| ModelError::InvalidTemporal {
        kind: "date",
        value: text.to_string(),
    })
}

/// Accepts `HH:MM` and, for rows written elsewhere, `HH:MM:SS`
pub fn parse_time(text: &str) -> Result<NaiveTime, ModelError> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| ModelError::InvalidTemporal {
            kind: "time",
            value: text.to_string(),
        })
}

text_enum! {
    /// A user's relation to an event
    AttendanceStatus, "attendance status" {
        Joined => "joined",
        Interested => "interested",
        Completed => "completed",
    }
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Joined
    }
}

/// One Event_Attendance row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_round_trip() {
        for status in AttendanceStatus::ALL {
            assert_eq!(status.as_str().parse::<AttendanceStatus>(), Ok(*status));
        }
        assert!("maybe".parse::<AttendanceStatus>().is_err());
        assert_eq!(AttendanceStatus::default(), AttendanceStatus::Joined);
    }

    #[test]
    fn test_date_and_time_formats() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_date(date), "2026-03-07");
        assert_eq!(format_time(time), "09:05");
        assert_eq!(parse_date("2026-03-07"), Ok(date));
        assert_eq!(parse_time("09:05"), Ok(time));
        assert_eq!(parse_time("09:05:00"), Ok(time));
        assert!(parse_date("07/03/2026").is_err());
    }
}
