use chrono::{DateTime, Utc};
use clubnet_core_types::SessionToken;

use crate::model::{User, UserId};

/// An authenticated user, held by the caller
///
/// Created by a successful login and passed explicitly into commands that
/// act on the user's behalf. Not `Clone`: `logout` consumes the only copy,
/// so a logged-out session cannot be used again.
#[derive(Debug)]
pub struct Session {
    token: SessionToken,
    user_id: UserId,
    email: String,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn start(user: &User) -> Self {
        Self {
            token: SessionToken::new(),
            user_id: user.id,
            email: user.email.clone(),
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this session acts as `user_id`
    pub fn is(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// End the session, returning its token for the caller's records
    pub fn end(self) -> SessionToken {
        self.token
    }
}
