//! Command handlers with boundary logging
//!
//! ## Logging Ownership
//!
//! Every handler emits:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The store below uses only `tracing::debug!()` for internal details.
//!
//! Handlers acting on behalf of a user take the caller's `&Session`;
//! acting on another user's record is `Forbidden`, a missing target record
//! is `NotFound`.

#![allow(clippy::result_large_err)]

pub mod accounts;
pub mod clubs;
pub mod events;
pub mod media;
pub mod reviews;
pub mod social;

use std::time::Instant;

use clubnet_core::errors::{ExError, ExErrorKind, Result};
use clubnet_core::model::UserId;
use clubnet_core::{log_op_end, log_op_error, log_op_start, Session};

/// Run `body` between a `start` and an `end`/`end_error` event
pub(crate) fn run_logged<T>(
    op: &'static str,
    actor: Option<UserId>,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    log_op_start!(op, user_id = actor);
    let start = Instant::now();

    let result = body().map_err(|e| {
        let e = if e.op().is_none() { e.with_op(op) } else { e };
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
    Ok(result)
}

pub(crate) fn not_found(entity: &str, id: impl ToString) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_entity_id(id)
        .with_message(format!("{} not found", entity))
}

/// The session must act as `owner`
pub(crate) fn require_self(session: &Session, owner: UserId, record: &str) -> Result<()> {
    if session.is(owner) {
        Ok(())
    } else {
        Err(ExError::new(ExErrorKind::Forbidden)
            .with_entity_id(owner)
            .with_message(format!(
                "user {} cannot act on another user's {}",
                session.user_id(),
                record
            )))
    }
}
