//! Port traits (interfaces for adapters).
//!
//! The loader and the config snapshot depend on these traits,
//! not on the process environment directly.

mod env_table;

pub use env_table::EnvTable;
