use clubnet_core::model::{Club, ClubId};
use clubnet_core::BoundingBox;
use rusqlite::types::Value;

use super::{contains_pattern, Filters};

const CLUB_SELECT: &str = "SELECT c.club_id, c.name, c.description, c.sport_type,
       c.location_lat, c.location_long, c.owner_id,
       COUNT(DISTINCT r.user_id) AS member_count,
       COALESCE(AVG(CAST(r.rating AS REAL)), 0.0) AS avg_rating
FROM Clubs c
LEFT JOIN Reviews r ON r.club_id = c.club_id";

/// Clubs with member count and mean rating
#[derive(Debug, Clone, Default)]
pub struct ClubQuery {
    filters: Filters,
}

impl ClubQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: ClubId) -> Self {
        Self::all().with_id(id)
    }

    pub fn with_id(mut self, id: ClubId) -> Self {
        self.filters.push("c.club_id = ?", [Value::Integer(id)]);
        self
    }

    /// Case-insensitive substring over name or sport type
    pub fn matching(mut self, text: &str) -> Self {
        let pattern = contains_pattern(text);
        self.filters.push(
            "(c.name LIKE ? ESCAPE '\\' OR c.sport_type LIKE ? ESCAPE '\\')",
            [Value::Text(pattern.clone()), Value::Text(pattern)],
        );
        self
    }

    pub fn sport(mut self, sport_type: &str) -> Self {
        self.filters
            .push("c.sport_type = ?", [Value::Text(sport_type.to_string())]);
        self
    }

    pub fn within(mut self, bbox: &BoundingBox) -> Self {
        self.filters.push(
            "c.location_lat BETWEEN ? AND ? AND c.location_long BETWEEN ? AND ?",
            [
                Value::Real(bbox.min_lat),
                Value::Real(bbox.max_lat),
                Value::Real(bbox.min_long),
                Value::Real(bbox.max_long),
            ],
        );
        self
    }

    pub fn sql(&self) -> String {
        format!(
            "{}\n{}\nGROUP BY c.club_id\nORDER BY c.club_id",
            CLUB_SELECT,
            self.filters.where_clause()
        )
    }

    pub fn params(&self) -> &[Value] {
        self.filters.params()
    }
}

/// Map one row of a `ClubQuery`
pub fn map_club_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Club> {
    Ok(Club {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        sport_type: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        owner_id: row.get(6)?,
        member_count: row.get(7)?,
        rating: row.get(8)?,
    })
}
