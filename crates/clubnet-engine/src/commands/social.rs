//! Friend requests and friendships of the logged-in user

use clubnet_core::errors::{ExError, ExErrorKind, Result};
use clubnet_core::model::{FriendLink, UserId};
use clubnet_core::Session;
use clubnet_store::Repository;

use super::{not_found, run_logged};

fn require_user(repo: &Repository, id: UserId) -> Result<()> {
    match repo.get_user(id)? {
        Some(_) => Ok(()),
        None => Err(not_found("user", id)),
    }
}

/// Ask `to` to be friends
///
/// ## Errors
///
/// - `NotFound`: no such user
/// - `InvalidInput`: `to` is the session's own user
pub fn send_friend_request(repo: &Repository, session: &Session, to: UserId) -> Result<()> {
    run_logged("send_friend_request", Some(session.user_id()), || {
        require_user(repo, to)?;
        repo.send_friend_request(session.user_id(), to)
    })
}

/// Accept the pending request `requester` sent to the logged-in user
///
/// ## Errors
///
/// - `NotFound`: no pending request from `requester`
pub fn accept_friend_request(
    repo: &Repository,
    session: &Session,
    requester: UserId,
) -> Result<()> {
    run_logged("accept_friend_request", Some(session.user_id()), || {
        if repo.accept_friend_request(session.user_id(), requester)? {
            Ok(())
        } else {
            Err(not_found("friend request", requester))
        }
    })
}

/// ## Errors
///
/// - `NotFound`: no pending request from `requester`
pub fn reject_friend_request(
    repo: &Repository,
    session: &Session,
    requester: UserId,
) -> Result<()> {
    run_logged("reject_friend_request", Some(session.user_id()), || {
        if repo.reject_friend_request(session.user_id(), requester)? {
            Ok(())
        } else {
            Err(not_found("friend request", requester))
        }
    })
}

pub fn block_user(repo: &Repository, session: &Session, target: UserId) -> Result<()> {
    run_logged("block_user", Some(session.user_id()), || {
        if target == session.user_id() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(target)
                .with_message("cannot block oneself"));
        }
        require_user(repo, target)?;
        repo.block_user(session.user_id(), target)
    })
}

pub fn friends(repo: &Repository, session: &Session) -> Result<Vec<FriendLink>> {
    run_logged("friends", Some(session.user_id()), || {
        repo.list_friends(session.user_id())
    })
}

pub fn pending_requests(repo: &Repository, session: &Session) -> Result<Vec<FriendLink>> {
    run_logged("pending_requests", Some(session.user_id()), || {
        repo.pending_requests(session.user_id())
    })
}

pub fn is_friend(repo: &Repository, session: &Session, other: UserId) -> Result<bool> {
    run_logged("is_friend", Some(session.user_id()), || {
        repo.are_friends(session.user_id(), other)
    })
}
