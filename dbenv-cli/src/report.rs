//! Rendering of the database settings report.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

use dbenv_types::DbConfig;

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `KEY: value` line per variable
    #[default]
    Text,
    /// Pretty-printed JSON object, `null` for unset variables
    Json,
}

/// Writes `config` to `out` in the requested format.
pub fn write_report<W: Write>(out: &mut W, config: &DbConfig, format: Format) -> Result<()> {
    match format {
        Format::Text => {
            for line in config.report_lines() {
                writeln!(out, "{}", line)?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, config)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
