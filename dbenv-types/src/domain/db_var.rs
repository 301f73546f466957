//! The fixed set of database connection variables.

use std::fmt;

/// Database connection variables recognized by the inspector.
///
/// Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbVar {
    Host,
    User,
    Password,
    Port,
    Name,
    Schema,
}

impl DbVar {
    /// Every variable, in report order.
    pub const ALL: [DbVar; 6] = [
        DbVar::Host,
        DbVar::User,
        DbVar::Password,
        DbVar::Port,
        DbVar::Name,
        DbVar::Schema,
    ];

    /// Returns the environment variable name.
    pub fn key(&self) -> &'static str {
        match self {
            DbVar::Host => "DB_HOST",
            DbVar::User => "DB_USER",
            DbVar::Password => "DB_PASSWORD",
            DbVar::Port => "DB_PORT",
            DbVar::Name => "DB_NAME",
            DbVar::Schema => "DB_SCHEMA",
        }
    }
}

impl fmt::Display for DbVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
