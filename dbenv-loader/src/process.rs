//! Process environment adapter.

use std::env;

use dbenv_types::EnvTable;

/// The environment table of the running process.
///
/// Writes go through `std::env::set_var`, so a `ProcessEnv` must only be
/// mutated while no other thread reads or writes the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl EnvTable for ProcessEnv {
    /// Non-UTF-8 values are converted lossily; a set variable is never `None`.
    fn get(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }

    fn contains(&self, name: &str) -> bool {
        env::var_os(name).is_some()
    }

    fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if name.is_empty() || name.contains(['=', '\0']) || value.contains('\0') {
            return false;
        }
        if self.contains(name) {
            return false;
        }
        // SAFETY: the environment is only written from the main thread
        // before any other thread is started.
        unsafe { env::set_var(name, value) };
        true
    }
}
