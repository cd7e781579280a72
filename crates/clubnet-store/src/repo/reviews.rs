use clubnet_core::model::{ClubId, MediaType, NewMedia, NewReview, Review, ReviewId, ReviewWithAuthor};
use rusqlite::Connection;

use super::media::insert_media;
use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::timestamp_column;

fn insert_review(conn: &Connection, review: &NewReview) -> rusqlite::Result<ReviewId> {
    conn.execute(
        "INSERT INTO Reviews (club_id, user_id, rating, text, media_url, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            review.club_id,
            review.user_id,
            review.rating,
            review.text,
            review.media_url,
            chrono::Utc::now().timestamp()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn map_review_with_author(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReviewWithAuthor> {
    Ok(ReviewWithAuthor {
        review: Review {
            id: row.get(0)?,
            club_id: row.get(1)?,
            user_id: row.get(2)?,
            rating: row.get(3)?,
            text: row.get(4)?,
            media_url: row.get(5)?,
            timestamp: timestamp_column(row, 6)?,
        },
        author_name: row.get(7)?,
        author_image: row.get(8)?,
    })
}

impl Repository {
    /// Store a review. A rating outside 1..=5 is refused by storage as a
    /// `ConstraintViolation`.
    pub fn add_review(&self, review: &NewReview) -> Result<ReviewId> {
        let id = insert_review(self.conn("add_review")?, review).map_err(sql_error("add_review"))?;
        tracing::debug!(review_id = id, club_id = review.club_id, "review added");
        Ok(id)
    }

    /// Store a review and, when it carries a media path and a type is given,
    /// a Media row for the same path. Both rows or neither.
    pub fn add_review_with_media(
        &mut self,
        review: &NewReview,
        media_type: Option<MediaType>,
    ) -> Result<ReviewId> {
        let media = match (&review.media_url, media_type) {
            (Some(url), Some(media_type)) => {
                let media = NewMedia::new(review.user_id, media_type, url.as_str());
                media.validate()?;
                Some(media)
            }
            _ => None,
        };

        let op = "add_review_with_media";
        let tx = self.conn_mut(op)?.transaction().map_err(sql_error(op))?;
        let id = insert_review(&tx, review).map_err(sql_error(op))?;
        let media_id = match &media {
            Some(media) => Some(insert_media(&tx, media).map_err(sql_error(op))?),
            None => None,
        };
        tx.commit().map_err(sql_error(op))?;

        tracing::debug!(review_id = id, media_id = ?media_id, "review added with media");
        Ok(id)
    }

    /// Reviews with author name and image, newest first
    pub fn reviews_for_club(&self, club_id: ClubId) -> Result<Vec<ReviewWithAuthor>> {
        let op = "reviews_for_club";
        let conn = self.conn(op)?;
        let mut stmt = conn
            .prepare(
                "SELECT r.review_id, r.club_id, r.user_id, r.rating, r.text, r.media_url,
                        r.timestamp, u.name, u.profile_image_path
                 FROM Reviews r
                 JOIN Users u ON u.user_id = r.user_id
                 WHERE r.club_id = ?1
                 ORDER BY r.timestamp DESC, r.review_id DESC",
            )
            .map_err(sql_error(op))?;
        let reviews = stmt
            .query_map([club_id], map_review_with_author)
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;
        Ok(reviews)
    }
}
