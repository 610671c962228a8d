//! Catalog commands: databases, database info, search and recessions.

use crate::display::{Format, Table, write_table};
use anyhow::{Context, Result};
use haverview_lib::prelude::*;
use std::path::PathBuf;

/// List the databases available to the key.
pub(crate) async fn databases(haver: &Haver) -> Result<()> {
    let databases = haver
        .databases()
        .await
        .context("Failed to list databases")?;

    if databases.is_empty() {
        println!("No databases found.");
        return Ok(());
    }

    println!("{:<12} DESCRIPTION", "NAME");
    println!("{}", "-".repeat(60));
    for (name, description) in &databases {
        println!("{name:<12} {description}");
    }

    println!("\nTotal: {} databases", databases.len());
    Ok(())
}

/// Show the first series record of a database.
pub(crate) async fn info(haver: &Haver, database: &str) -> Result<()> {
    let info = haver
        .database_info(database)
        .await
        .with_context(|| format!("Failed to get info for database {database}"))?;

    println!("Database:    {database}");
    println!("Series:      {}", info.name);
    println!("Description: {}", info.description);
    for (key, value) in &info.extra {
        match value {
            serde_json::Value::String(s) => println!("{key}: {s}"),
            other => println!("{key}: {other}"),
        }
    }
    Ok(())
}

/// Print raw search results.
pub(crate) async fn search(haver: &Haver, query: &str) -> Result<()> {
    let results = haver
        .search(query)
        .await
        .with_context(|| format!("Search for {query:?} failed"))?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Write the recession table.
pub(crate) async fn recessions(
    haver: &Haver,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let table = haver
        .recessions()
        .await
        .context("Failed to get recessions")?;

    write_table(Table::Records(&table), output.as_deref(), format)?;
    if let Some(path) = output {
        eprintln!("Wrote {} recessions to {}", table.len(), path.display());
    }
    Ok(())
}
