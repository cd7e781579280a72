//! Directed friend edges
//!
//! A row `(user_id, friend_id, status)` is an edge from `user_id` to
//! `friend_id`. A request from A to B is the edge A→B with status pending;
//! B accepting flips that same edge to accepted. Friendship is therefore a
//! property of the pair, derived by looking for an accepted edge in either
//! direction, never a stored flag.

use serde::{Deserialize, Serialize};

use crate::model::{text_enum, UserId};

text_enum! {
    FriendStatus, "friend status" {
        Pending => "pending",
        Accepted => "accepted",
        Blocked => "blocked",
    }
}

/// One Friends row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendEdge {
    pub user_id: UserId,
    pub friend_id: UserId,
    pub status: FriendStatus,
}

/// Direction of an edge as seen by one of its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// The viewer created the edge (sent the request)
    Outgoing,
    /// The edge points at the viewer (received the request)
    Incoming,
}

impl FriendEdge {
    /// Direction relative to `viewer`, or `None` if the viewer is not an endpoint
    pub fn direction_for(&self, viewer: UserId) -> Option<EdgeDirection> {
        if self.user_id == viewer {
            Some(EdgeDirection::Outgoing)
        } else if self.friend_id == viewer {
            Some(EdgeDirection::Incoming)
        } else {
            None
        }
    }

    /// The endpoint that is not `viewer`
    pub fn counterpart(&self, viewer: UserId) -> Option<UserId> {
        match self.direction_for(viewer)? {
            EdgeDirection::Outgoing => Some(self.friend_id),
            EdgeDirection::Incoming => Some(self.user_id),
        }
    }
}

/// An edge seen from one user, with the other user's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendLink {
    pub edge: FriendEdge,
    pub direction: EdgeDirection,
    pub counterpart_id: UserId,
    pub counterpart_name: String,
}
