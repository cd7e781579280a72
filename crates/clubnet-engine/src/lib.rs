//! ClubNet Engine - command layer
//!
//! Wraps repository operations in the checks that need a logged-in user
//! (ownership, existence of the records acted on) and owns lifecycle
//! logging for every command.

pub mod commands;
