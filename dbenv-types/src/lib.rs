//! # dbenv Types
//!
//! Domain types and port traits for the database environment inspector.
//! This crate has ZERO IO dependencies - only data structures and the
//! trait that environment adapters implement.
//!
//! ## Architecture
//!
//! - `domain/` - The recognized database variables and the config snapshot
//! - `ports/` - The `EnvTable` trait that adapters must implement
//! - `dto/` - Values handed back across the loader boundary
//! - `error/` - Loader error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ABSENT_MARKER, DbConfig, DbVar};
pub use dto::LoadSummary;
pub use error::LoadError;
pub use ports::EnvTable;
