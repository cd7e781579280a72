//! Identity: password digests and login sessions
//!
//! Passwords are reduced to a one-way SHA-256 digest over the raw bytes,
//! hex encoded. Authentication recomputes the digest and compares digests;
//! the raw password never reaches storage or logs.

pub mod password;
pub mod session;

pub use password::PasswordDigest;
pub use session::Session;
