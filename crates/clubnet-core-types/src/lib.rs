//! Core types shared across ClubNet facilities
//!
//! This crate provides foundational types used by the error, logging and
//! identity facilities:
//!
//! - **Session tokens**: SessionToken
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;
pub mod session;

pub use sensitive::Sensitive;
pub use session::SessionToken;
