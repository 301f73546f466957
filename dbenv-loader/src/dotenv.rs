//! Env file discovery and loading.
//!
//! Files are parsed with `dotenvy` (comments, `export` prefixes, quoting and
//! `${VAR}` substitution) and merged into an [`EnvTable`] without replacing
//! anything already set. Missing files and malformed lines are tolerated.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dbenv_types::{EnvTable, LoadError, LoadSummary};
use tracing::{debug, warn};

/// File name searched for by [`load_default`].
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Finds `file_name` in `start_dir` or the nearest ancestor that has it.
pub fn locate(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Loads the `.env` file found from the current working directory upward.
pub fn load_default<T: EnvTable + ?Sized>(table: &mut T) -> Result<LoadSummary, LoadError> {
    let cwd = env::current_dir().map_err(|source| LoadError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    match locate(&cwd, DEFAULT_FILE_NAME) {
        Some(path) => load(table, path),
        None => {
            debug!(cwd = %cwd.display(), "no {} file found", DEFAULT_FILE_NAME);
            Ok(LoadSummary::not_found())
        }
    }
}

/// Merges the entries of the env file at `path` into `table`.
///
/// Keys already present in `table` keep their value. When the file assigns
/// the same key more than once, the last assignment is the one merged.
///
/// `${VAR}` references are resolved by `dotenvy` against the process
/// environment first, then against earlier assignments in the same file.
/// `table` itself is never consulted, so a [`MemoryEnv`](crate::MemoryEnv)
/// still sees substitutions from the real environment.
pub fn load<T: EnvTable + ?Sized>(
    table: &mut T,
    path: impl AsRef<Path>,
) -> Result<LoadSummary, LoadError> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "env file not found, nothing to load");
            return Ok(LoadSummary::not_found());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut summary = LoadSummary {
        path: Some(path.to_path_buf()),
        ..LoadSummary::default()
    };
    let mut entries: Vec<(String, String)> = Vec::new();

    let mut source = match contents.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => contents,
    };
    while let Some(rest) = parse_entries(&source, path, &mut entries, &mut summary)? {
        source = rest;
    }

    for (key, value) in &entries {
        if table.set_if_absent(key, value) {
            debug!(key = %key, "applied");
            summary.applied += 1;
        } else {
            debug!(key = %key, "already set, keeping existing value");
            summary.kept += 1;
        }
    }

    debug!(
        path = %path.display(),
        applied = summary.applied,
        kept = summary.kept,
        skipped = summary.skipped,
        "env file loaded"
    );
    Ok(summary)
}

/// Parses `source` into `entries`, skipping malformed statements.
///
/// An unterminated quote makes `dotenvy` swallow everything up to end of
/// input as one failed statement. In that case only its first line is
/// dropped and the remaining text is returned so it can be parsed again.
fn parse_entries(
    source: &str,
    path: &Path,
    entries: &mut Vec<(String, String)>,
    summary: &mut LoadSummary,
) -> Result<Option<String>, LoadError> {
    let mut unterminated = None;

    for item in dotenvy::from_read_iter(source.as_bytes()) {
        // Any item after a multi-line failure means it was not cut off by EOF.
        unterminated = None;

        match item {
            Ok((key, value)) if value.contains('\0') => {
                warn!(path = %path.display(), key = %key, "skipping value containing NUL");
                summary.skipped += 1;
            }
            Ok((key, value)) => match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            },
            Err(dotenvy::Error::LineParse(statement, position)) => {
                // The statement itself may hold a secret, so only the position is logged.
                warn!(path = %path.display(), position, "skipping malformed line");
                summary.skipped += 1;
                unterminated = statement
                    .split_once('\n')
                    .map(|(_, rest)| rest.to_string())
                    .filter(|rest| !rest.trim().is_empty());
            }
            Err(dotenvy::Error::Io(source)) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                summary.skipped += 1;
            }
        }
    }

    Ok(unterminated)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::MemoryEnv;

    fn write_env(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_FILE_NAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_HOST=localhost\nDB_PORT=5432\n");
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_HOST").as_deref(), Some("localhost"));
        assert_eq!(table.get("DB_PORT").as_deref(), Some("5432"));
        assert_eq!(table.get("DB_USER"), None);
        assert_eq!(summary.path.as_deref(), Some(path.as_path()));
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.kept, 0);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_existing_values_win() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_NAME=test_db\nDB_USER=app\n");
        let mut table: MemoryEnv = [("DB_NAME", "prod_db")].into_iter().collect();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_NAME").as_deref(), Some("prod_db"));
        assert_eq!(table.get("DB_USER").as_deref(), Some("app"));
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.kept, 1);
    }

    #[test]
    fn test_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut table: MemoryEnv = [("DB_HOST", "localhost")].into_iter().collect();
        let before = table.clone();

        let summary = load(&mut table, dir.path().join("absent.env")).unwrap();

        assert!(!summary.found());
        assert_eq!(summary, LoadSummary::not_found());
        assert_eq!(table, before);
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_HOST=localhost\nDB_SCHEMA=public\n");
        let mut table = MemoryEnv::new();

        load(&mut table, &path).unwrap();
        let once = table.clone();
        let second = load(&mut table, &path).unwrap();

        assert_eq!(table, once);
        assert_eq!(second.applied, 0);
        assert_eq!(second.kept, 2);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_env(
            &dir,
            "DB_HOST=localhost\nnot a valid line\n=missing_key\nDB_PORT=5432\n",
        );
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_HOST").as_deref(), Some("localhost"));
        assert_eq!(table.get("DB_PORT").as_deref(), Some("5432"));
        assert_eq!(table.len(), 2);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_unterminated_quote_skips_only_its_line() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_HOST=localhost\nDB_USER='oops\nDB_PORT=5432\n");
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_HOST").as_deref(), Some("localhost"));
        assert_eq!(table.get("DB_USER"), None);
        assert_eq!(table.get("DB_PORT").as_deref(), Some("5432"));
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_repeated_unterminated_quotes() {
        let dir = TempDir::new().unwrap();
        let path = write_env(
            &dir,
            "DB_USER=\"open\nDB_NAME=orders\nDB_PASSWORD='open\nDB_SCHEMA=public",
        );
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_NAME").as_deref(), Some("orders"));
        assert_eq!(table.get("DB_SCHEMA").as_deref(), Some("public"));
        assert_eq!(table.len(), 2);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_closed_multiline_value_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_PASSWORD=\"line one\nline two\"\nDB_PORT=5432\n");
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(
            table.get("DB_PASSWORD").as_deref(),
            Some("line one\nline two")
        );
        assert_eq!(table.get("DB_PORT").as_deref(), Some("5432"));
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_substitution_reads_earlier_assignments() {
        let dir = TempDir::new().unwrap();
        let path = write_env(
            &dir,
            "DBENV_SUBST_TEST_BASE=db.internal\nDB_HOST=${DBENV_SUBST_TEST_BASE}\n",
        );
        let mut table = MemoryEnv::new();

        load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_HOST").as_deref(), Some("db.internal"));
    }

    #[test]
    fn test_substitution_ignores_target_table() {
        let name = "DBENV_SUBST_TEST_PROCESS";
        unsafe { env::set_var(name, "from-process") };
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_HOST=${DBENV_SUBST_TEST_PROCESS}\n");
        let mut table: MemoryEnv = [(name, "from-table")].into_iter().collect();

        load(&mut table, &path).unwrap();
        unsafe { env::remove_var(name) };

        assert_eq!(table.get("DB_HOST").as_deref(), Some("from-process"));
    }

    #[test]
    fn test_comments_quotes_and_export() {
        let dir = TempDir::new().unwrap();
        let path = write_env(
            &dir,
            "# connection settings\n\
             \n\
             export DB_HOST=db.internal\n\
             DB_USER='app user'\n\
             DB_PASSWORD=\"p#ss word\"\n\
             # DB_NAME=commented_out\n\
             DB_NAME=orders\n",
        );
        let mut table = MemoryEnv::new();

        load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_HOST").as_deref(), Some("db.internal"));
        assert_eq!(table.get("DB_USER").as_deref(), Some("app user"));
        assert_eq!(table.get("DB_PASSWORD").as_deref(), Some("p#ss word"));
        assert_eq!(table.get("DB_NAME").as_deref(), Some("orders"));
    }

    #[test]
    fn test_last_assignment_in_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_PORT=5432\nDB_PORT=6543\n");
        let mut table = MemoryEnv::new();

        let summary = load(&mut table, &path).unwrap();

        assert_eq!(table.get("DB_PORT").as_deref(), Some("6543"));
        assert_eq!(summary.applied, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut table = MemoryEnv::new();

        let result = load(&mut table, dir.path());

        assert!(matches!(result, Err(LoadError::Io { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn test_locate_walks_up_to_parent() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "DB_HOST=localhost\n");
        let nested = dir.path().join("service").join("bin");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(locate(&nested, DEFAULT_FILE_NAME), Some(path));
    }

    #[test]
    fn test_locate_prefers_nearest_file() {
        let dir = TempDir::new().unwrap();
        write_env(&dir, "DB_HOST=outer\n");
        let nested = dir.path().join("service");
        fs::create_dir_all(&nested).unwrap();
        let inner = nested.join(DEFAULT_FILE_NAME);
        fs::write(&inner, "DB_HOST=inner\n").unwrap();

        assert_eq!(locate(&nested, DEFAULT_FILE_NAME), Some(inner));
    }

    #[test]
    fn test_locate_ignores_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("db.env")).unwrap();

        assert_eq!(locate(dir.path(), "db.env"), None);
    }
}
