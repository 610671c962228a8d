//! Tabular results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One observation of one series, joined with its country metadata.
///
/// Field order is the column order of [`SeriesTable::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    /// Observation date.
    pub date: NaiveDate,
    /// Raw Haver geography code.
    pub country: String,
    /// ISO alpha-2 code of the geography.
    pub country_alpha2: String,
    /// Name of the geography.
    pub country_name: String,
    /// Database code, lowercased.
    pub database: String,
    /// Series code, lowercased.
    pub variable: String,
    /// Observed value.
    pub value: Option<f64>,
}

/// Observations of one or more series, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesTable {
    rows: Vec<SeriesRow>,
}

impl SeriesTable {
    /// Column names, in output order.
    pub const COLUMNS: [&'static str; 7] = [
        "date",
        "country",
        "country_alpha2",
        "country_name",
        "database",
        "variable",
        "value",
    ];

    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<SeriesRow> {
        self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, SeriesRow> {
        self.rows.iter()
    }

    /// Appends a row.
    pub fn push(&mut self, row: SeriesRow) {
        self.rows.push(row);
    }

    /// Returns the rows belonging to one (lowercased) variable.
    pub fn variable<'a>(&'a self, variable: &'a str) -> impl Iterator<Item = &'a SeriesRow> + 'a {
        self.rows.iter().filter(move |r| r.variable == variable)
    }
}

impl Extend<SeriesRow> for SeriesTable {
    fn extend<I: IntoIterator<Item = SeriesRow>>(&mut self, iter: I) {
        self.rows.extend(iter);
    }
}

impl FromIterator<SeriesRow> for SeriesTable {
    fn from_iter<I: IntoIterator<Item = SeriesRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SeriesTable {
    type Item = &'a SeriesRow;
    type IntoIter = std::slice::Iter<'a, SeriesRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A table built from an array of JSON objects.
///
/// Columns are the union of the record keys in first-seen order; a record
/// lacking a column gets `null` in that cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Builds a table from JSON objects.
    #[must_use]
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Removes a column. Returns false if there was no such column.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows, cells aligned with [`RecordTable::columns`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cells of one column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Returns the rows as JSON objects.
    #[must_use]
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn create_test_row(variable: &str, day: u32) -> SeriesRow {
        SeriesRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            country: "111".into(),
            country_alpha2: "US".into(),
            country_name: "United States".into(),
            database: "usecon".into(),
            variable: variable.into(),
            value: Some(1.0),
        }
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let json = serde_json::to_string(&create_test_row("gdp", 1)).unwrap();
        let positions: Vec<_> = SeriesTable::COLUMNS
            .iter()
            .map(|c| json.find(&format!("\"{c}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_series_table_variable_filter() {
        let table: SeriesTable = vec![
            create_test_row("gdp", 1),
            create_test_row("cpi", 1),
            create_test_row("gdp", 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 3);
        assert_eq!(table.variable("gdp").count(), 2);
        assert_eq!(table.variable("ip").count(), 0);
    }

    #[test]
    fn test_record_table_union_of_columns() {
        let table = RecordTable::from_records(vec![
            record(json!({"index": 0, "country": "US", "start": "2020-02-01"})),
            record(json!({"index": 1, "country": "JP", "end": "2020-05-01"})),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 4);
        let ends: Vec<_> = table.column("end").unwrap().collect();
        assert_eq!(ends, vec![&Value::Null, &json!("2020-05-01")]);
    }

    #[test]
    fn test_record_table_keeps_key_order() {
        let mut table = RecordTable::from_records(vec![
            record(json!({"index": 0, "startDate": "2020-02-01", "endDate": "2020-04-30", "country": "US"})),
            record(json!({"index": 1, "startDate": "2018-10-01", "endDate": "2020-05-31", "country": "JP", "note": "x"})),
        ]);
        table.drop_column("index");

        assert_eq!(table.columns(), ["startDate", "endDate", "country", "note"]);
        let first: Vec<_> = table.to_records()[0].keys().cloned().collect();
        assert_eq!(first, ["startDate", "endDate", "country", "note"]);
    }

    #[test]
    fn test_record_table_drop_column() {
        let mut table = RecordTable::from_records(vec![record(
            json!({"index": 0, "country": "US"}),
        )]);

        assert!(table.drop_column("index"));
        assert!(!table.drop_column("index"));
        assert_eq!(table.columns(), ["country".to_string()]);
        assert_eq!(table.rows()[0], vec![json!("US")]);
        assert_eq!(table.to_records()[0].get("country"), Some(&json!("US")));
    }
}
