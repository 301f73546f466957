//! Immutable snapshot of the database connection settings.

use serde::Serialize;

use crate::domain::DbVar;
use crate::ports::EnvTable;

/// Printed in place of a variable that is not set.
pub const ABSENT_MARKER: &str = "None";

/// Database connection settings captured from an environment table.
///
/// Built once by [`DbConfig::from_table`]; later changes to the table are
/// not reflected. Serializes to an object keyed by variable name, with
/// `null` for unset variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DbConfig {
    #[serde(rename = "DB_HOST")]
    host: Option<String>,
    #[serde(rename = "DB_USER")]
    user: Option<String>,
    #[serde(rename = "DB_PASSWORD")]
    password: Option<String>,
    #[serde(rename = "DB_PORT")]
    port: Option<String>,
    #[serde(rename = "DB_NAME")]
    name: Option<String>,
    #[serde(rename = "DB_SCHEMA")]
    schema: Option<String>,
}

impl DbConfig {
    /// Reads every recognized variable from `table`.
    pub fn from_table<T: EnvTable + ?Sized>(table: &T) -> Self {
        let get = |var: DbVar| table.get(var.key());
        Self {
            host: get(DbVar::Host),
            user: get(DbVar::User),
            password: get(DbVar::Password),
            port: get(DbVar::Port),
            name: get(DbVar::Name),
            schema: get(DbVar::Schema),
        }
    }

    /// Returns the captured value for `var`.
    pub fn lookup(&self, var: DbVar) -> Option<&str> {
        let value = match var {
            DbVar::Host => &self.host,
            DbVar::User => &self.user,
            DbVar::Password => &self.password,
            DbVar::Port => &self.port,
            DbVar::Name => &self.name,
            DbVar::Schema => &self.schema,
        };
        value.as_deref()
    }

    /// Iterates over all variables in report order.
    pub fn entries(&self) -> impl Iterator<Item = (DbVar, Option<&str>)> + '_ {
        DbVar::ALL.into_iter().map(|var| (var, self.lookup(var)))
    }

    /// Formats one `"<KEY>: <value>"` line per variable, in report order.
    pub fn report_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries()
            .map(|(var, value)| format!("{}: {}", var, value.unwrap_or(ABSENT_MARKER)))
    }

    /// Returns `true` when none of the variables are set.
    pub fn is_empty(&self) -> bool {
        self.entries().all(|(_, value)| value.is_none())
    }
}
