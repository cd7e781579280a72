//! ClubNet Store - SQLite persistence for the club data layer
//!
//! Provides:
//! - Connection configuration and opening (`StoreConfig`, `db`)
//! - Versioned, checksummed, additive migrations
//! - A query composer for the aggregate reads (club ratings, event
//!   participant counts, search, bounding-box proximity, upcoming events)
//! - `Repository`, the explicitly opened/closed handle exposing every
//!   entity operation

pub mod config;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod query;
pub mod repo;

// Re-export key types
pub use config::{StoreConfig, StoreLocation};
pub use errors::Result;
pub use repo::Repository;
