//! Shared fixtures for formatter tests.

use chrono::NaiveDate;
use haverview_types::{RecordTable, SeriesRow, SeriesTable};
use serde_json::json;

fn row(month: u32, value: Option<f64>) -> SeriesRow {
    SeriesRow {
        date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
        country: "111".into(),
        country_alpha2: "US".into(),
        country_name: "United States".into(),
        database: "usecon".into(),
        variable: "gdp".into(),
        value,
    }
}

pub(crate) fn create_test_table() -> SeriesTable {
    vec![row(1, Some(1.5)), row(2, None)].into_iter().collect()
}

pub(crate) fn create_test_records() -> RecordTable {
    let records = [
        json!({"country": "US", "end": "2020-04-30", "name": "Covid, 2020"}),
        json!({"country": "JP", "end": null, "name": "The \"Great\" One"}),
    ];
    RecordTable::from_records(
        records
            .into_iter()
            .filter_map(|r| r.as_object().cloned())
            .collect(),
    )
}
