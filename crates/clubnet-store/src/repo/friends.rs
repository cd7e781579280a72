//! Friend edges
//!
//! A request from A to B is the row (A, B, pending). B accepting flips that
//! same row to accepted, so an accepted friendship is one row whose
//! direction records who asked.

use std::collections::HashSet;

use clubnet_core::errors::{ExError, ExErrorKind};
use clubnet_core::model::{EdgeDirection, FriendEdge, FriendLink, FriendStatus, UserId};

use super::Repository;
use crate::errors::{sql_error, Result};
use crate::query::parse_column;

fn map_link_row(viewer: UserId) -> impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<FriendLink> {
    move |row| {
        let status: String = row.get(2)?;
        let edge = FriendEdge {
            user_id: row.get(0)?,
            friend_id: row.get(1)?,
            status: parse_column(2, &status, |s| s.parse::<FriendStatus>())?,
        };
        let (direction, counterpart_id) = if edge.user_id == viewer {
            (EdgeDirection::Outgoing, edge.friend_id)
        } else {
            (EdgeDirection::Incoming, edge.user_id)
        };
        Ok(FriendLink {
            edge,
            direction,
            counterpart_id,
            counterpart_name: row.get(3)?,
        })
    }
}

impl Repository {
    /// Create or reset the edge `from → to` as pending
    pub fn send_friend_request(&self, from: UserId, to: UserId) -> Result<()> {
        if from == to {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("send_friend_request")
                .with_entity_id(from)
                .with_message("cannot send a friend request to oneself"));
        }
        self.upsert_edge("send_friend_request", from, to, FriendStatus::Pending)
    }

    /// Accept the pending request `requester → recipient`
    ///
    /// Returns `false` if there is no such pending request.
    pub fn accept_friend_request(&self, recipient: UserId, requester: UserId) -> Result<bool> {
        let updated = self
            .conn("accept_friend_request")?
            .execute(
                "UPDATE Friends SET status = ?1
                 WHERE user_id = ?2 AND friend_id = ?3 AND status = ?4",
                rusqlite::params![
                    FriendStatus::Accepted.as_str(),
                    requester,
                    recipient,
                    FriendStatus::Pending.as_str()
                ],
            )
            .map_err(sql_error("accept_friend_request"))?;
        tracing::debug!(recipient, requester, updated, "friend request accepted");
        Ok(updated > 0)
    }

    /// Drop the pending request `requester → recipient`
    pub fn reject_friend_request(&self, recipient: UserId, requester: UserId) -> Result<bool> {
        let deleted = self
            .conn("reject_friend_request")?
            .execute(
                "DELETE FROM Friends WHERE user_id = ?1 AND friend_id = ?2 AND status = ?3",
                rusqlite::params![requester, recipient, FriendStatus::Pending.as_str()],
            )
            .map_err(sql_error("reject_friend_request"))?;
        Ok(deleted > 0)
    }

    /// Set the edge `user → target` to blocked, replacing any request
    pub fn block_user(&self, user: UserId, target: UserId) -> Result<()> {
        self.upsert_edge("block_user", user, target, FriendStatus::Blocked)
    }

    /// An accepted edge in either direction, and no block in either direction
    pub fn are_friends(&self, a: UserId, b: UserId) -> Result<bool> {
        let (accepted, blocked): (i64, i64) = self
            .conn("are_friends")?
            .query_row(
                "SELECT COALESCE(SUM(status = ?3), 0), COALESCE(SUM(status = ?4), 0)
                 FROM Friends
                 WHERE (user_id = ?1 AND friend_id = ?2) OR (user_id = ?2 AND friend_id = ?1)",
                rusqlite::params![
                    a,
                    b,
                    FriendStatus::Accepted.as_str(),
                    FriendStatus::Blocked.as_str()
                ],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(sql_error("are_friends"))?;
        Ok(accepted > 0 && blocked == 0)
    }

    /// Accepted friendships of `user`, one per counterpart, by counterpart id
    pub fn list_friends(&self, user: UserId) -> Result<Vec<FriendLink>> {
        let op = "list_friends";
        let conn = self.conn(op)?;
        let mut stmt = conn
            .prepare(
                "SELECT f.user_id, f.friend_id, f.status, u.name
                 FROM Friends f
                 JOIN Users u
                   ON u.user_id = CASE WHEN f.user_id = ?1 THEN f.friend_id ELSE f.user_id END
                 WHERE (f.user_id = ?1 OR f.friend_id = ?1) AND f.status = ?2
                 ORDER BY u.user_id, f.user_id",
            )
            .map_err(sql_error(op))?;
        let links = stmt
            .query_map(
                rusqlite::params![user, FriendStatus::Accepted.as_str()],
                map_link_row(user),
            )
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;

        // Both directions may have been accepted independently
        let mut seen = HashSet::new();
        Ok(links
            .into_iter()
            .filter(|link| seen.insert(link.counterpart_id))
            .collect())
    }

    /// Pending requests addressed to `user`, with the requester's name
    pub fn pending_requests(&self, user: UserId) -> Result<Vec<FriendLink>> {
        let op = "pending_requests";
        let conn = self.conn(op)?;
        let mut stmt = conn
            .prepare(
                "SELECT f.user_id, f.friend_id, f.status, u.name
                 FROM Friends f
                 JOIN Users u ON u.user_id = f.user_id
                 WHERE f.friend_id = ?1 AND f.status = ?2
                 ORDER BY f.user_id",
            )
            .map_err(sql_error(op))?;
        let links = stmt
            .query_map(
                rusqlite::params![user, FriendStatus::Pending.as_str()],
                map_link_row(user),
            )
            .map_err(sql_error(op))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error(op))?;
        Ok(links)
    }

    fn upsert_edge(
        &self,
        op: &'static str,
        from: UserId,
        to: UserId,
        status: FriendStatus,
    ) -> Result<()> {
        self.conn(op)?
            .execute(
                "INSERT OR REPLACE INTO Friends (user_id, friend_id, status) VALUES (?1, ?2, ?3)",
                rusqlite::params![from, to, status.as_str()],
            )
            .map_err(sql_error(op))?;
        tracing::debug!(op, from, to, status = %status, "friend edge written");
        Ok(())
    }
}
