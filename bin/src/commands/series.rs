//! Series listing command.

use crate::display::{Format, Table, series_records, write_table};
use anyhow::{Context, Result};
use haverview_lib::prelude::*;

/// List the series of a database, as names or as full records.
pub(crate) async fn series(
    haver: &Haver,
    database: &str,
    like: Option<&str>,
    full: bool,
    format: Format,
) -> Result<()> {
    let listing = haver
        .series(database, like, full)
        .await
        .with_context(|| format!("Failed to list series of {database}"))?;

    match listing {
        SeriesListing::Names(names) => {
            println!("{:<16} DESCRIPTION", "NAME");
            println!("{}", "-".repeat(60));
            for (name, description) in &names {
                println!("{name:<16} {description}");
            }
            println!("\nTotal: {} series", names.len());
        }
        SeriesListing::Full(records) => {
            let table = series_records(&records)?;
            write_table(Table::Records(&table), None, format)?;
        }
    }

    Ok(())
}
