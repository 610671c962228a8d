//! CSV output format.

use haverview_types::{RecordTable, SeriesTable};
use serde_json::Value;
use std::borrow::Cow;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a field holding the delimiter, a quote or a line break.
    fn escape<'a>(&self, field: &'a str) -> Cow<'a, str> {
        if field.contains([self.delimiter, '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }

    fn write_line<W: Write, I, S>(&self, writer: &mut W, fields: I) -> Result<(), FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut delimiter = [0u8; 4];
        let delimiter = self.delimiter.encode_utf8(&mut delimiter);
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                writer.write_all(delimiter.as_bytes())?;
            }
            writer.write_all(self.escape(field.as_ref()).as_bytes())?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// Renders a JSON cell: strings unquoted, `null` empty.
fn cell(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

impl Formatter for CsvFormatter {
    fn write_series<W: Write + Send>(
        &self,
        table: &SeriesTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            self.write_line(&mut writer, SeriesTable::COLUMNS)?;
        }

        for row in table {
            let date = row.date.format("%Y-%m-%d").to_string();
            let value = row.value.map(|v| v.to_string()).unwrap_or_default();
            self.write_line(
                &mut writer,
                [
                    date.as_str(),
                    row.country.as_str(),
                    row.country_alpha2.as_str(),
                    row.country_name.as_str(),
                    row.database.as_str(),
                    row.variable.as_str(),
                    value.as_str(),
                ],
            )?;
        }

        Ok(())
    }

    fn write_records<W: Write + Send>(
        &self,
        table: &RecordTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            self.write_line(&mut writer, table.columns())?;
        }

        for row in table.rows() {
            self.write_line(&mut writer, row.iter().map(cell))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_records, create_test_table};
    use std::io::Cursor;

    #[test]
    fn test_csv_series() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_series(&create_test_table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines[0],
            "date,country,country_alpha2,country_name,database,variable,value"
        );
        assert_eq!(lines[1], "2024-01-01,111,US,United States,usecon,gdp,1.5");
        // Missing value renders as an empty cell
        assert_eq!(lines[2], "2024-02-01,111,US,United States,usecon,gdp,");
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_series(&create_test_table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("date,country"));
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_series(&create_test_table(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("date\tcountry\tcountry_alpha2"));
        assert_eq!(formatter.extension(), "tsv");
    }

    #[test]
    fn test_csv_records_quote_and_null() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_records(&create_test_records(), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "country,end,name");
        assert_eq!(lines[1], "US,2020-04-30,\"Covid, 2020\"");
        assert_eq!(lines[2], "JP,,\"The \"\"Great\"\" One\"");
    }
}
