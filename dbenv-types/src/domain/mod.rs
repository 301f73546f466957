//! Domain models for the environment inspector.

pub mod config;
pub mod db_var;

pub use config::{ABSENT_MARKER, DbConfig};
pub use db_var::DbVar;
