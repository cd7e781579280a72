//! Registration, login and the logged-in user's own profile

use clubnet_core::errors::{ExError, ExErrorKind, Result};
use clubnet_core::model::{NewUser, User, UserId, UserProfileUpdate};
use clubnet_core::Session;
use clubnet_core_types::{Sensitive, SessionToken};
use clubnet_store::Repository;

use super::{not_found, run_logged};

/// Register a new account
///
/// ## Errors
///
/// - `InvalidInput`: empty name, email or password
/// - `ConstraintViolation`: the email is already registered
pub fn register(repo: &Repository, user: &NewUser) -> Result<UserId> {
    run_logged("register", None, || repo.create_user(user))
}

/// Log in, starting a session
///
/// ## Errors
///
/// - `Unauthorised`: unknown email or wrong password (not told apart)
pub fn login(repo: &Repository, email: &str, password: &Sensitive<String>) -> Result<Session> {
    run_logged("login", None, || {
        let user = repo.authenticate(email, password)?.ok_or_else(|| {
            ExError::new(ExErrorKind::Unauthorised).with_message("invalid email or password")
        })?;
        let session = Session::start(&user);
        tracing::debug!(user_id = user.id, "session started");
        Ok(session)
    })
}

/// End a session; the consumed session cannot be reused
pub fn logout(session: Session) -> SessionToken {
    let user_id = session.user_id();
    let token = session.end();
    tracing::info!(op = "logout", user_id, "session ended");
    token
}

/// The logged-in user's own record
///
/// ## Errors
///
/// - `NotFound`: the account was deleted after login
pub fn current_user(repo: &Repository, session: &Session) -> Result<User> {
    run_logged("current_user", Some(session.user_id()), || {
        repo.get_user(session.user_id())?
            .ok_or_else(|| not_found("user", session.user_id()))
    })
}

/// Update the supplied profile fields of the logged-in user
pub fn update_profile(
    repo: &Repository,
    session: &Session,
    update: &UserProfileUpdate,
) -> Result<()> {
    run_logged("update_profile", Some(session.user_id()), || {
        if repo.update_user_profile(session.user_id(), update)? {
            Ok(())
        } else {
            Err(not_found("user", session.user_id()))
        }
    })
}

pub fn set_profile_image(repo: &Repository, session: &Session, path: &str) -> Result<()> {
    run_logged("set_profile_image", Some(session.user_id()), || {
        if repo.update_profile_image(session.user_id(), path)? {
            Ok(())
        } else {
            Err(not_found("user", session.user_id()))
        }
    })
}

pub fn find_users(repo: &Repository, text: &str) -> Result<Vec<User>> {
    run_logged("find_users", None, || repo.search_users(text))
}

/// Delete the logged-in user's account
///
/// The session stays with the caller; end it with `logout` once this
/// succeeds. On failure it is still valid for the account it names.
pub fn delete_account(repo: &Repository, session: &Session) -> Result<()> {
    let user_id = session.user_id();
    run_logged("delete_account", Some(user_id), || {
        if repo.delete_user(user_id)? {
            Ok(())
        } else {
            Err(not_found("user", user_id))
        }
    })
}
