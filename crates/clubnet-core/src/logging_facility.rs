//! Structured logging facility for ClubNet
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`) used
//!   by the command layer; the store logs internals at `debug` only
//! - Test capture mode for deterministic assertions
//!
//! ```rust
//! use clubnet_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
