//! # dbenv Loader
//!
//! Concrete environment tables (adapters) and the env file loader.
//! This crate provides the adapters that implement the `EnvTable` port
//! and merges dotenv files into them without overriding existing values.

pub mod dotenv;
pub mod memory;
pub mod process;

pub use dotenv::{DEFAULT_FILE_NAME, load, load_default, locate};
pub use memory::MemoryEnv;
pub use process::ProcessEnv;
