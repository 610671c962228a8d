//! Apache Parquet output format.

use arrow::array::{ArrayRef, Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::Datelike;
use haverview_types::{RecordTable, SeriesRow, SeriesTable};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for series tables.
    fn series_schema() -> Schema {
        let mut fields = vec![Field::new("date", DataType::Date32, false)];
        fields.extend(
            SeriesTable::COLUMNS[1..6]
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, false)),
        );
        fields.push(Field::new("value", DataType::Float64, true));
        Schema::new(fields)
    }

    /// Creates an all-string schema for a record table.
    fn records_schema(table: &RecordTable) -> Schema {
        Schema::new(
            table
                .columns()
                .iter()
                .map(|name| Field::new(name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        )
    }

    /// Converts series rows to an Arrow RecordBatch.
    fn series_to_batch(schema: &Arc<Schema>, rows: &[SeriesRow]) -> Result<RecordBatch, FormatError> {
        let strings = |f: fn(&SeriesRow) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(rows.iter().map(f)))
        };

        let dates: Vec<i32> = rows
            .iter()
            .map(|r| r.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(Date32Array::from(dates)),
                strings(|r| r.country.as_str()),
                strings(|r| r.country_alpha2.as_str()),
                strings(|r| r.country_name.as_str()),
                strings(|r| r.database.as_str()),
                strings(|r| r.variable.as_str()),
                Arc::new(Float64Array::from(values)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts record rows to an Arrow RecordBatch of strings.
    fn records_to_batch(
        schema: &Arc<Schema>,
        rows: &[Vec<Value>],
    ) -> Result<RecordBatch, FormatError> {
        let columns: Vec<ArrayRef> = (0..schema.fields().len())
            .map(|idx| {
                let cells = rows.iter().map(|row| match &row[idx] {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                });
                Arc::new(StringArray::from_iter(cells)) as ArrayRef
            })
            .collect();

        RecordBatch::try_new(Arc::clone(schema), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn writer<W: Write + Send>(
        &self,
        writer: W,
        schema: Arc<Schema>,
    ) -> Result<ArrowWriter<W>, FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_series<W: Write + Send>(
        &self,
        table: &SeriesTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::series_schema());
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        // Write in batches
        for chunk in table.rows().chunks(self.row_group_size) {
            let batch = Self::series_to_batch(&schema, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn write_records<W: Write + Send>(
        &self,
        table: &RecordTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::records_schema(table));
        let mut arrow_writer = self.writer(writer, Arc::clone(&schema))?;

        for chunk in table.rows().chunks(self.row_group_size) {
            let batch = Self::records_to_batch(&schema, chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
