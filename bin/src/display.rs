//! Display utilities and output formatting for the haverview CLI.

use anyhow::Result;
#[cfg(not(feature = "parquet"))]
use anyhow::bail;
use clap::ValueEnum;
use haverview_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for tables.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A table the CLI can write.
#[derive(Clone, Copy)]
pub(crate) enum Table<'a> {
    Series(&'a SeriesTable),
    Records(&'a RecordTable),
}

impl Table<'_> {
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Series(table) => table.len(),
            Self::Records(table) => table.len(),
        }
    }
}

/// Opens `output`, or stdout when none is given.
fn open(output: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn emit<F: Formatter, W: Write + Send>(formatter: &F, table: Table<'_>, writer: W) -> Result<()> {
    match table {
        Table::Series(table) => formatter.write_series(table, writer)?,
        Table::Records(table) => formatter.write_records(table, writer)?,
    }
    Ok(())
}

/// Write a table to a file, or stdout, in the specified format.
pub(crate) fn write_table(table: Table<'_>, output: Option<&Path>, format: Format) -> Result<()> {
    let writer = open(output)?;

    match format {
        Format::Csv => emit(&CsvFormatter::new(), table, writer),
        Format::Tsv => emit(&CsvFormatter::tsv(), table, writer),
        Format::Json => emit(&JsonFormatter::new().with_pretty(true), table, writer),
        Format::Ndjson => emit(&JsonFormatter::ndjson(), table, writer),
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                emit(&ParquetFormatter::new(), table, writer)
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                bail!("Parquet support not compiled in");
            }
        }
    }
}

/// Turns full series records into a table, one column per field.
pub(crate) fn series_records(records: &[SeriesInfo]) -> Result<RecordTable> {
    let rows = records
        .iter()
        .map(|info| match serde_json::to_value(info)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(RecordTable::from_records(rows))
}
