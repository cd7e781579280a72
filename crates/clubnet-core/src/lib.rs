//! ClubNet Core - domain model and shared facilities for the club data layer
//!
//! This crate provides:
//! - Domain records for users, clubs, events, attendance, reviews, media and
//!   friend edges, with the write-side inputs that create them
//! - The error facility (`ExError`, `ExErrorKind`, `ModelError`)
//! - The logging facility and its lifecycle macros
//! - Identity: one-way password digests and explicit login sessions
//! - The bounding-box approximation used for proximity queries
//!
//! Persistence lives in `clubnet-store`; nothing here touches SQLite.

pub mod errors;
pub mod geo;
pub mod identity;
pub mod logging_facility;
pub mod model;

// Re-exported for the logging macros
#[doc(hidden)]
pub use clubnet_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use geo::BoundingBox;
pub use identity::{PasswordDigest, Session};
