use clubnet_core::model::{EventId, Media, MediaId, MediaType, NewMedia, UserId};
use rusqlite::{Connection, OptionalExtension};

use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::{parse_column, timestamp_column};

const MEDIA_SELECT: &str = "SELECT media_id, user_id, event_id, type, url, timestamp FROM Media";
const MEDIA_ORDER: &str = "ORDER BY timestamp DESC, media_id DESC";

fn map_media_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Media> {
    let media_type: String = row.get(3)?;
    Ok(Media {
        id: row.get(0)?,
        user_id: row.get(1)?,
        event_id: row.get(2)?,
        media_type: parse_column(3, &media_type, |s| s.parse::<MediaType>())?,
        url: row.get(4)?,
        timestamp: timestamp_column(row, 5)?,
    })
}

/// Insert one Media row on `conn`, which may be an open transaction
pub(super) fn insert_media(conn: &Connection, media: &NewMedia) -> rusqlite::Result<MediaId> {
    conn.execute(
        "INSERT INTO Media (user_id, event_id, type, url, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            media.user_id,
            media.event_id,
            media.media_type.as_str(),
            media.url,
            chrono::Utc::now().timestamp()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Repository {
    pub fn save_media(&self, media: &NewMedia) -> Result<MediaId> {
        media.validate()?;
        let id = insert_media(self.conn("save_media")?, media).map_err(sql_error("save_media"))?;
        tracing::debug!(media_id = id, user_id = media.user_id, media_type = %media.media_type, "media saved");
        Ok(id)
    }

    pub fn get_media(&self, id: MediaId) -> Result<Option<Media>> {
        self.conn("get_media")?
            .query_row(
                &format!("{} WHERE media_id = ?1", MEDIA_SELECT),
                [id],
                map_media_row,
            )
            .optional()
            .map_err(sql_error("get_media"))
    }

    pub fn media_for_event(&self, event_id: EventId) -> Result<Vec<Media>> {
        self.query_media("media_for_event", "WHERE event_id = ?1", event_id)
    }

    pub fn media_for_user(&self, user_id: UserId) -> Result<Vec<Media>> {
        self.query_media("media_for_user", "WHERE user_id = ?1", user_id)
    }

    pub fn media_by_type(&self, media_type: MediaType) -> Result<Vec<Media>> {
        self.query_media("media_by_type", "WHERE type = ?1", media_type.as_str())
    }

    pub fn delete_media(&self, id: MediaId) -> Result<bool> {
        let deleted = self
            .conn("delete_media")?
            .execute("DELETE FROM Media WHERE media_id = ?1", [id])
            .map_err(sql_error("delete_media"))?;
        Ok(deleted > 0)
    }

    fn query_media(
        &self,
        op: &'static str,
        filter: &str,
        param: impl rusqlite::ToSql,
    ) -> Result<Vec<Media>> {
        let conn = self.conn(op)?;
        let mut stmt = conn
            .prepare(&format!("{} {} {}", MEDIA_SELECT, filter, MEDIA_ORDER))
            .map_err(sql_error(op))?;
        let media = stmt
            .query_map([param], map_media_row)
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;
        Ok(media)
    }
}
