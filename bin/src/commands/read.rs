//! Read command implementation.
//!
//! Fetches every code into one flat table and writes it out.

use crate::display::{Format, Table, write_table};
use anyhow::{Context, Result};
use haverview_lib::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Read series codes and write the combined table.
pub(crate) async fn read(
    haver: &Haver,
    codes: &[String],
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let table = haver
        .read_table(codes)
        .await
        .context("Failed to read series")?;

    info!(codes = codes.len(), rows = table.len(), "read series table");

    let table = Table::Series(&table);
    write_table(table, output.as_deref(), format)?;
    if let Some(path) = output {
        eprintln!("Wrote {} observations to {}", table.len(), path.display());
    }
    Ok(())
}
