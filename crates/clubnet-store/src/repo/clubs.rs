use clubnet_core::model::{Club, ClubId, NewClub};
use clubnet_core::BoundingBox;
use rusqlite::OptionalExtension;

use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::{map_club_row, ClubQuery};

impl Repository {
    pub fn create_club(&self, club: &NewClub) -> Result<ClubId> {
        club.validate()?;
        let conn = self.conn("create_club")?;
        conn.execute(
            "INSERT INTO Clubs (name, description, sport_type, location_lat, location_long, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                club.name,
                club.description,
                club.sport_type,
                club.latitude,
                club.longitude,
                club.owner_id
            ],
        )
        .map_err(sql_error("create_club"))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(club_id = id, owner_id = club.owner_id, "club created");
        Ok(id)
    }

    pub fn list_clubs(&self) -> Result<Vec<Club>> {
        self.query_clubs("list_clubs", &ClubQuery::all())
    }

    pub fn get_club(&self, id: ClubId) -> Result<Option<Club>> {
        let query = ClubQuery::by_id(id);
        self.conn("get_club")?
            .query_row(
                &query.sql(),
                rusqlite::params_from_iter(query.params()),
                map_club_row,
            )
            .optional()
            .map_err(sql_error("get_club"))
    }

    /// Case-insensitive substring over name or sport type
    pub fn search_clubs(&self, text: &str) -> Result<Vec<Club>> {
        self.query_clubs("search_clubs", &ClubQuery::all().matching(text))
    }

    /// Clubs inside the bounding box of `radius_km` around a point
    ///
    /// A box, not a circle: corners reach about 1.41 radii from the centre.
    pub fn clubs_near(&self, latitude: f64, longitude: f64, radius_km: f64) -> Result<Vec<Club>> {
        let bbox = BoundingBox::around(latitude, longitude, radius_km)?;
        self.query_clubs("clubs_near", &ClubQuery::all().within(&bbox))
    }

    pub fn clubs_by_sport(&self, sport_type: &str) -> Result<Vec<Club>> {
        self.query_clubs("clubs_by_sport", &ClubQuery::all().sport(sport_type))
    }

    /// Mean review rating, 0.0 for a club without reviews
    pub fn club_average_rating(&self, id: ClubId) -> Result<f64> {
        self.conn("club_average_rating")?
            .query_row(
                "SELECT COALESCE(AVG(CAST(rating AS REAL)), 0.0) FROM Reviews WHERE club_id = ?1",
                [id],
                |row| row.get(0),
            )
            .map_err(sql_error("club_average_rating"))
    }

    /// Remove a club with its events and reviews
    pub fn delete_club(&self, id: ClubId) -> Result<bool> {
        let deleted = self
            .conn("delete_club")?
            .execute("DELETE FROM Clubs WHERE club_id = ?1", [id])
            .map_err(sql_error("delete_club"))?;
        tracing::debug!(club_id = id, deleted, "club deleted");
        Ok(deleted > 0)
    }

    fn query_clubs(&self, op: &'static str, query: &ClubQuery) -> Result<Vec<Club>> {
        let conn = self.conn(op)?;
        let mut stmt = conn.prepare(&query.sql()).map_err(sql_error(op))?;
        let clubs = stmt
            .query_map(rusqlite::params_from_iter(query.params()), map_club_row)
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;
        tracing::debug!(op, rows = clubs.len(), "club query");
        Ok(clubs)
    }
}
