//! Environment table port.
//!
//! Implementations can wrap the process environment, an in-memory map, etc.

/// Port trait for a name -> value variable table.
pub trait EnvTable {
    /// Returns the value stored under `name`, or `None` if it is absent.
    fn get(&self, name: &str) -> Option<String>;

    /// Stores `value` under `name` unless `name` is already present.
    ///
    /// Returns `true` when the value was inserted. An existing value is
    /// never replaced.
    fn set_if_absent(&mut self, name: &str, value: &str) -> bool;

    /// Returns `true` if `name` has a value.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
